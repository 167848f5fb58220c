//! Trait contract between the engine and problem implementations.

use rand::Rng;

/// Marker trait for fitness values.
///
/// Lower is better (minimization). Maximization problems negate their
/// objective. Implementations exist for `f64` and `f32`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// The worst representable fitness, used for unevaluated individuals.
    fn worst() -> Self;

    /// Conversion to `f64` for history tracking and logging.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn worst() -> Self {
        f32::INFINITY
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the population.
///
/// Individuals carry their own fitness. The runner calls
/// [`EvolutionProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness); freshly created or recombined
/// individuals should start at [`Fitness::worst`].
pub trait Individual: Clone + Send + Sync {
    /// The fitness type.
    type Fitness: Fitness;

    /// Current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Stores an evaluated fitness.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines an optimization problem for the engine.
///
/// Implementors supply the four domain-specific pieces of the loop:
/// initialization, evaluation, crossover, and mutation. Everything takes an
/// explicit `&mut R: Rng` so runs are reproducible under a fixed seed.
///
/// Must be `Send + Sync`: the runner may evaluate individuals in parallel.
pub trait EvolutionProblem: Send + Sync {
    /// The solution type for this problem.
    type Individual: Individual;

    /// Creates a random (valid, not necessarily good) individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Computes the fitness of an individual. Lower is better.
    ///
    /// May run in parallel across the population; must not mutate shared
    /// state.
    fn evaluate(&self, individual: &Self::Individual)
        -> <Self::Individual as Individual>::Fitness;

    /// Recombines two parents into one or two offspring.
    ///
    /// The default clones `parent1` (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone()]
    }

    /// Perturbs an individual in place. The default is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called at the end of each generation with the best fitness so far.
    ///
    /// The default is a no-op; typical implementations log progress.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}

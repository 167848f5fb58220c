//! Engine configuration.

use super::selection::Selection;

/// Parameters of the evolutionary loop.
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::{EvolutionConfig, Selection};
///
/// let config = EvolutionConfig::default()
///     .with_population_size(64)
///     .with_max_generations(50)
///     .with_selection(Selection::Tournament(3))
///     .with_seed(42);
/// assert_eq!(config.population_size, 64);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Parent-selection strategy.
    pub selection: Selection,

    /// Fraction of the population copied unchanged into the next
    /// generation (0.0–1.0).
    pub elite_ratio: f64,

    /// Probability that a pair of parents is recombined (0.0–1.0).
    /// Otherwise a clone of the first parent is passed through.
    pub crossover_rate: f64,

    /// Probability that an offspring is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// Generations without improvement before stopping early.
    /// 0 disables stagnation-based termination.
    pub stagnation_limit: usize,

    /// Evaluate individuals in parallel with rayon.
    pub parallel: bool,

    /// Random seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            selection: Selection::default(),
            elite_ratio: 0.1,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            stagnation_limit: 50,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the parent-selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration for values the runner cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(format!("elite_ratio out of range: {}", self.elite_ratio));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = EvolutionConfig::default()
            .with_population_size(64)
            .with_max_generations(50)
            .with_elite_ratio(0.0625)
            .with_crossover_rate(1.0)
            .with_mutation_rate(1.0)
            .with_stagnation_limit(0)
            .with_parallel(false)
            .with_seed(7);

        assert_eq!(config.population_size, 64);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.elite_ratio, 0.0625);
        assert_eq!(config.seed, Some(7));
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rates_are_clamped() {
        let config = EvolutionConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.2)
            .with_elite_ratio(2.0);

        assert_eq!(config.crossover_rate, 1.0);
        assert_eq!(config.mutation_rate, 0.0);
        assert_eq!(config.elite_ratio, 1.0);
    }

    #[test]
    fn test_zero_population_rejected() {
        let config = EvolutionConfig::default().with_population_size(0);
        assert!(config.validate().is_err());
    }
}

//! The evolutionary loop.
//!
//! [`EvolutionRunner`] drives initialization → evaluation → selection →
//! crossover → mutation, preserving elites and stopping on generation count
//! or stagnation.

use super::config::EvolutionConfig;
use super::types::{EvolutionProblem, Fitness, Individual};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Outcome of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<I: Individual> {
    /// Best individual found across the whole run.
    pub best: I,

    /// Fitness of `best`.
    pub best_fitness: I::Fitness,

    /// Generations executed.
    pub generations: usize,

    /// Whether the run stopped early due to stagnation.
    pub stagnated: bool,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the evolutionary loop for an [`EvolutionProblem`].
///
/// ```ignore
/// let result = EvolutionRunner::run(&problem, &EvolutionConfig::default().with_seed(42));
/// println!("best fitness: {:?}", result.best_fitness);
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs the loop to completion.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (see [`EvolutionConfig::validate`]).
    pub fn run<P: EvolutionProblem>(
        problem: &P,
        config: &EvolutionConfig,
    ) -> EvolutionResult<P::Individual> {
        config.validate().expect("invalid EvolutionConfig");

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_slice(problem, &mut population, config.parallel);

        let mut best = find_best(&population).clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness().to_f64());

        let mut stagnant_generations = 0usize;

        for generation in 0..config.max_generations {
            // Best first, so the elite slice is the head of the population.
            population.sort_by(|a, b| {
                a.fitness()
                    .partial_cmp(&b.fitness())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let elite_count =
                (config.population_size as f64 * config.elite_ratio) as usize;
            let mut next_generation: Vec<P::Individual> =
                population[..elite_count].to_vec();

            while next_generation.len() < config.population_size {
                let p1 = config.selection.select(&population, &mut rng);
                let p2 = config.selection.select(&population, &mut rng);

                let offspring = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    problem.crossover(&population[p1], &population[p2], &mut rng)
                } else {
                    vec![population[p1].clone()]
                };

                for mut child in offspring {
                    if next_generation.len() >= config.population_size {
                        break;
                    }
                    if rng.random_range(0.0..1.0) < config.mutation_rate {
                        problem.mutate(&mut child, &mut rng);
                    }
                    next_generation.push(child);
                }
            }

            // Elites keep their fitness; only the newcomers are evaluated.
            evaluate_slice(problem, &mut next_generation[elite_count..], config.parallel);
            population = next_generation;

            let generation_best = find_best(&population);
            if generation_best.fitness() < best.fitness() {
                best = generation_best.clone();
                stagnant_generations = 0;
            } else {
                stagnant_generations += 1;
            }

            fitness_history.push(best.fitness().to_f64());
            log::debug!(
                "generation {}: best fitness {:?}",
                generation + 1,
                best.fitness()
            );
            problem.on_generation(generation + 1, best.fitness());

            if config.stagnation_limit > 0 && stagnant_generations >= config.stagnation_limit {
                log::debug!(
                    "stopping after {} stagnant generations",
                    stagnant_generations
                );
                return EvolutionResult {
                    best_fitness: best.fitness(),
                    best,
                    generations: generation + 1,
                    stagnated: true,
                    fitness_history,
                };
            }
        }

        EvolutionResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            stagnated: false,
            fitness_history,
        }
    }
}

fn evaluate_slice<P: EvolutionProblem>(
    problem: &P,
    individuals: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        individuals.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        for ind in individuals.iter_mut() {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        }
    }
}

fn find_best<I: Individual>(population: &[I]) -> &I {
    population
        .iter()
        .min_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population must not be empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Selection;

    // Toy problem: match a fixed boolean pattern. Fitness counts mismatches,
    // so the optimum is 0.
    #[derive(Clone, Debug)]
    struct Mask {
        bits: Vec<bool>,
        fitness: f64,
    }

    impl Individual for Mask {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
        }
    }

    struct PatternMatch {
        target: Vec<bool>,
    }

    impl PatternMatch {
        fn new(n: usize) -> Self {
            Self {
                target: (0..n).map(|i| i % 3 != 0).collect(),
            }
        }
    }

    impl EvolutionProblem for PatternMatch {
        type Individual = Mask;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Mask {
            Mask {
                bits: (0..self.target.len()).map(|_| rng.random_bool(0.5)).collect(),
                fitness: f64::INFINITY,
            }
        }

        fn evaluate(&self, ind: &Mask) -> f64 {
            ind.bits
                .iter()
                .zip(&self.target)
                .filter(|(a, b)| a != b)
                .count() as f64
        }

        fn crossover<R: Rng>(&self, p1: &Mask, p2: &Mask, rng: &mut R) -> Vec<Mask> {
            let cut = rng.random_range(0..self.target.len());
            let splice = |head: &Mask, tail: &Mask| Mask {
                bits: head.bits[..cut]
                    .iter()
                    .chain(&tail.bits[cut..])
                    .copied()
                    .collect(),
                fitness: f64::INFINITY,
            };
            vec![splice(p1, p2), splice(p2, p1)]
        }

        fn mutate<R: Rng>(&self, ind: &mut Mask, rng: &mut R) {
            let idx = rng.random_range(0..ind.bits.len());
            ind.bits[idx] = !ind.bits[idx];
        }
    }

    #[test]
    fn test_converges_on_pattern() {
        let problem = PatternMatch::new(24);
        let config = EvolutionConfig::default()
            .with_population_size(60)
            .with_max_generations(200)
            .with_mutation_rate(0.3)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false);

        let result = EvolutionRunner::run(&problem, &config);
        assert!(
            result.best_fitness <= 3.0,
            "expected a near-perfect match on 24 bits, got {} mismatches",
            result.best_fitness
        );
    }

    #[test]
    fn test_elitism_keeps_history_monotone() {
        let problem = PatternMatch::new(16);
        let config = EvolutionConfig::default()
            .with_population_size(30)
            .with_max_generations(60)
            .with_elite_ratio(0.2)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false);

        let result = EvolutionRunner::run(&problem, &config);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best-so-far must never regress: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_stagnation_stops_early() {
        let problem = PatternMatch::new(6);
        let config = EvolutionConfig::default()
            .with_population_size(20)
            .with_max_generations(5000)
            .with_stagnation_limit(10)
            .with_seed(42)
            .with_parallel(false);

        let result = EvolutionRunner::run(&problem, &config);
        assert!(result.generations < 5000);
    }

    #[test]
    fn test_fitness_history_length() {
        let problem = PatternMatch::new(10);
        let config = EvolutionConfig::default()
            .with_population_size(20)
            .with_max_generations(25)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false);

        let result = EvolutionRunner::run(&problem, &config);
        // Initial evaluation plus one entry per generation.
        assert_eq!(result.fitness_history.len(), 26);
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem = PatternMatch::new(18);
        let config = EvolutionConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_seed(7)
            .with_parallel(false);

        let a = EvolutionRunner::run(&problem, &config);
        let b = EvolutionRunner::run(&problem, &config);
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_all_selection_strategies_make_progress() {
        let problem = PatternMatch::new(12);
        for selection in [Selection::Tournament(3), Selection::Roulette, Selection::Rank] {
            let config = EvolutionConfig::default()
                .with_population_size(30)
                .with_max_generations(80)
                .with_selection(selection)
                .with_seed(42)
                .with_parallel(false);

            let result = EvolutionRunner::run(&problem, &config);
            assert!(
                result.best_fitness < 6.0,
                "{selection:?} should improve on random, got {}",
                result.best_fitness
            );
        }
    }

    #[test]
    fn test_parallel_completes() {
        let problem = PatternMatch::new(20);
        let config = EvolutionConfig::default()
            .with_population_size(40)
            .with_max_generations(50)
            .with_seed(42)
            .with_parallel(true);

        let result = EvolutionRunner::run(&problem, &config);
        assert!(result.best_fitness.is_finite());
    }

    #[test]
    fn test_default_operators_run() {
        // A problem relying on the default crossover (clone) and mutate (no-op).
        struct Passive;

        impl EvolutionProblem for Passive {
            type Individual = Mask;

            fn create_individual<R: Rng>(&self, rng: &mut R) -> Mask {
                Mask {
                    bits: vec![rng.random_bool(0.5)],
                    fitness: f64::INFINITY,
                }
            }

            fn evaluate(&self, ind: &Mask) -> f64 {
                if ind.bits[0] {
                    0.0
                } else {
                    1.0
                }
            }
        }

        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_max_generations(5)
            .with_seed(42)
            .with_parallel(false);

        let result = EvolutionRunner::run(&Passive, &config);
        assert!(result.generations > 0);
        assert!(!result.fitness_history.is_empty());
    }
}

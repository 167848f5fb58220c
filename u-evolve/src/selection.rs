//! Parent-selection strategies.
//!
//! Selection decides which individuals become parents. All strategies assume
//! minimization (lower fitness = better) and return an index into the
//! population.
//!
//! # Reference
//! Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//! Evolutionary Algorithms"

use super::types::{Fitness, Individual};
use rand::Rng;

/// Parent-selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Pick `k` individuals uniformly at random, keep the best.
    ///
    /// `k` controls selection pressure: 2 is light, 3–5 moderate, larger
    /// values risk premature convergence.
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Weights are inverted (`max − fitness + ε`) so that lower fitness
    /// gets a larger share of the wheel. Sensitive to fitness scaling.
    Roulette,

    /// Linear rank selection.
    ///
    /// Selection probability depends only on the fitness ordering, not on
    /// the raw values, which avoids roulette's scaling problems.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "cannot select from an empty population");

        match self {
            Selection::Tournament(k) => tournament(population, (*k).max(1), rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut winner = rng.random_range(0..n);
    for _ in 1..k {
        let challenger = rng.random_range(0..n);
        if population[challenger].fitness() < population[winner].fitness() {
            winner = challenger;
        }
    }
    winner
}

fn roulette<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let fitnesses: Vec<f64> = population.iter().map(|i| i.fitness().to_f64()).collect();
    let max = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Invert so the lowest fitness carries the largest weight.
    let epsilon = 1e-10;
    let weights: Vec<f64> = fitnesses
        .iter()
        .map(|&f| (max - f + epsilon).max(epsilon))
        .collect();

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (idx, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return idx;
        }
    }
    n - 1
}

fn rank<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        population[a]
            .fitness()
            .partial_cmp(&population[b].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Best rank gets weight n, worst gets 1.
    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (position, &idx) in order.iter().enumerate() {
        cumulative += (n - position) as f64;
        if cumulative > threshold {
            return idx;
        }
    }
    *order.last().expect("population is non-empty")
}

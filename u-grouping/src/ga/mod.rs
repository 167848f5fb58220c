//! GA encoding for group formation.
//!
//! Implements the grouping-specific pieces on top of `u-evolve`'s generic
//! engine: the partition chromosome, validity/repair/canonicalization, the
//! group-aware crossover, swap mutation, and the problem bridge.
//!
//! # Encoding
//!
//! One gene per student, gene value = group id; see [`GroupingChromosome`]
//! for the validity invariant and canonical form.
//!
//! # Reference
//! - Falkenauer (1998), "Genetic Algorithms and Grouping Problems"

mod chromosome;
mod operators;
mod problem;

pub use chromosome::{swap_mutation, GroupingChromosome};
pub use operators::group_crossover;
pub use problem::GroupingGaProblem;

//! Group-formation framework.
//!
//! Partitions a population of students into fixed-size groups that maximize
//! aggregate pairwise compatibility, searching over partitions with a
//! genetic algorithm. This crate defines the grouping domain — compatibility
//! scoring, the partition chromosome and its invariant-preserving operators —
//! while the generic evolutionary loop is provided by `u-evolve` at a lower
//! layer.
//!
//! # Modules
//!
//! - **`models`**: Domain types — [`models::Student`], [`models::StudyGroup`],
//!   [`models::Grouping`]
//! - **`repository`**: Student lookup behind [`repository::StudentRepository`],
//!   with the in-memory [`repository::StudentRoster`]
//! - **`geo`**: Location distances behind [`geo::DistanceProvider`], with the
//!   coordinate-backed [`geo::LocationTable`]
//! - **`scoring`**: Pair and group compatibility ([`scoring::CompatibilityScorer`])
//! - **`ga`**: Partition chromosome, group-aware crossover, swap mutation,
//!   and the [`ga::GroupingGaProblem`] bridge into `u-evolve`
//! - **`validation`**: Batch input integrity checks
//! - **`error`**: [`error::GroupingError`]
//!
//! # Architecture
//!
//! All datasets are injected: scoring resolves students through a
//! [`repository::StudentRepository`] and locations through a
//! [`geo::DistanceProvider`], so tests substitute fixtures freely and no
//! state lives at module level. Every randomized operation takes `&mut impl
//! Rng`; a fixed seed reproduces a run exactly.
//!
//! # References
//!
//! - Falkenauer (1998), *Genetic Algorithms and Grouping Problems*
//! - Felder & Silverman (1988), "Learning and Teaching Styles in Engineering
//!   Education"

pub mod error;
pub mod ga;
pub mod geo;
pub mod models;
pub mod repository;
pub mod scoring;
pub mod validation;

//! Grouping domain models.
//!
//! Core data types for describing a population of students and the groups
//! a search produces. The types carry no scoring or search logic; scoring
//! lives in [`crate::scoring`] and the GA encoding in [`crate::ga`].

mod group;
mod student;

pub use group::{Grouping, StudyGroup};
pub use student::{Student, StudentId};

//! Decoded grouping report.
//!
//! A [`Grouping`] is the readable form of a chromosome: one
//! [`StudyGroup`] per group id, each with its member list and compatibility
//! score. Produced by [`crate::ga::GroupingGaProblem::decode`]; there is no
//! other persisted solution format.

use serde::{Deserialize, Serialize};

use super::StudentId;

/// One group of a decoded partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyGroup {
    /// Canonical group id within the partition.
    pub id: usize,
    /// Member student ids, in ascending order.
    pub members: Vec<StudentId>,
    /// Mean pairwise compatibility of the members.
    pub compatibility: f64,
}

/// A full partition of the roster into groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    /// Groups in ascending id order.
    pub groups: Vec<StudyGroup>,
}

impl Grouping {
    /// Mean of the per-group compatibility scores.
    ///
    /// Matches the fitness the search optimizes (before negation into the
    /// engine's minimization convention).
    pub fn mean_compatibility(&self) -> f64 {
        if self.groups.is_empty() {
            return 0.0;
        }
        let total: f64 = self.groups.iter().map(|g| g.compatibility).sum();
        total / self.groups.len() as f64
    }

    /// The group containing `student`, if any.
    pub fn group_of(&self, student: StudentId) -> Option<&StudyGroup> {
        self.groups.iter().find(|g| g.members.contains(&student))
    }

    /// Member list of the group with the given id.
    pub fn members_of(&self, group_id: usize) -> Option<&[StudentId]> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.members.as_slice())
    }
}

//! Student model.
//!
//! A student is described by the three attributes the compatibility score
//! combines: a learning-style vector, a location key, and a set of enrolled
//! module identifiers.
//!
//! # Reference
//! Felder & Silverman (1988), "Learning and Teaching Styles in Engineering
//! Education" (the four-dimension style vector used by the study-group
//! deployment)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Student identifier: dense integers in `[0, N)` for a roster of `N`.
///
/// Chromosome position `i` always refers to the student with id `i`, so the
/// encoding carries no separate id column.
pub type StudentId = usize;

/// A student to be placed into a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier, dense within the roster.
    pub id: StudentId,
    /// Learning-style dimensions. The deployed surveys produce four, but
    /// nothing here depends on the count.
    pub learning_style: Vec<f64>,
    /// Location key resolved by a [`crate::geo::DistanceProvider`].
    /// Matching is case-insensitive.
    pub location: String,
    /// Enrolled module identifiers.
    pub modules: HashSet<String>,
}

impl Student {
    /// Creates a student with empty attributes.
    pub fn new(id: StudentId) -> Self {
        Self {
            id,
            learning_style: Vec::new(),
            location: String::new(),
            modules: HashSet::new(),
        }
    }

    /// Sets the learning-style vector.
    pub fn with_learning_style(mut self, dims: impl Into<Vec<f64>>) -> Self {
        self.learning_style = dims.into();
        self
    }

    /// Sets the location key.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Adds one enrolled module.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.insert(module.into());
        self
    }

    /// Replaces the module set.
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let student = Student::new(3)
            .with_learning_style([0.5, -0.5, 1.0, 0.0])
            .with_location("Bishan")
            .with_modules(["CS1010", "MA1521"])
            .with_module("GEA1000");

        assert_eq!(student.id, 3);
        assert_eq!(student.learning_style.len(), 4);
        assert_eq!(student.location, "Bishan");
        assert_eq!(student.modules.len(), 3);
        assert!(student.modules.contains("MA1521"));
    }

    #[test]
    fn test_duplicate_modules_collapse() {
        let student = Student::new(0).with_modules(["CS1010", "CS1010"]);
        assert_eq!(student.modules.len(), 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let student = Student::new(1)
            .with_learning_style([1.0, 2.0, 3.0, 4.0])
            .with_location("Clementi")
            .with_modules(["CS2030", "CS2040"]);

        let json = serde_json::to_string(&student).unwrap();
        let back: Student = serde_json::from_str(&json).unwrap();
        assert_eq!(back, student);
    }
}

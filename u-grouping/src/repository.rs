//! Student lookup.
//!
//! Scoring and decoding resolve students through the [`StudentRepository`]
//! trait rather than a module-level dataset, so tests and callers can
//! substitute fixtures. [`StudentRoster`] is the provided in-memory
//! implementation.

use crate::error::{GroupingError, Result};
use crate::models::{Student, StudentId};

/// Read access to the population of students.
///
/// Ids are dense: every id in `[0, len())` resolves, anything else is
/// [`GroupingError::UnknownStudent`].
pub trait StudentRepository: Send + Sync {
    /// Resolves a student by id.
    fn get(&self, id: StudentId) -> Result<&Student>;

    /// Number of students in the population.
    fn len(&self) -> usize;

    /// Whether the population is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory repository indexed by student id.
///
/// Construction sorts by id and rejects rosters whose ids are not exactly
/// `0..N`, so `get` is a plain slice index afterwards.
#[derive(Debug, Clone)]
pub struct StudentRoster {
    students: Vec<Student>,
}

impl StudentRoster {
    /// Builds a roster from students with dense ids `0..N` (any order).
    pub fn new(mut students: Vec<Student>) -> Result<Self> {
        students.sort_by_key(|s| s.id);
        for (index, student) in students.iter().enumerate() {
            if student.id != index {
                return Err(GroupingError::InvalidConfiguration(format!(
                    "student ids must be dense in [0, {}); found id {} at position {}",
                    students.len(),
                    student.id,
                    index
                )));
            }
        }
        Ok(Self { students })
    }

    /// All students in id order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }
}

impl StudentRepository for StudentRoster {
    fn get(&self, id: StudentId) -> Result<&Student> {
        self.students
            .get(id)
            .ok_or(GroupingError::UnknownStudent(id))
    }

    fn len(&self) -> usize {
        self.students.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: StudentId) -> Student {
        Student::new(id)
            .with_learning_style([1.0, 0.0, 0.0, 0.0])
            .with_location("Bishan")
    }

    #[test]
    fn test_dense_roster() {
        let roster = StudentRoster::new(vec![student(2), student(0), student(1)]).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(1).unwrap().id, 1);
        assert_eq!(roster.students()[2].id, 2);
    }

    #[test]
    fn test_missing_id_rejected() {
        // 0, 2 skips 1.
        let err = StudentRoster::new(vec![student(0), student(2)]).unwrap_err();
        assert!(matches!(err, GroupingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = StudentRoster::new(vec![student(0), student(0)]).unwrap_err();
        assert!(matches!(err, GroupingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let roster = StudentRoster::new(vec![student(0)]).unwrap();
        assert_eq!(roster.get(5), Err(GroupingError::UnknownStudent(5)));
    }

    #[test]
    fn test_empty_roster() {
        let roster = StudentRoster::new(Vec::new()).unwrap();
        assert!(roster.is_empty());
    }
}

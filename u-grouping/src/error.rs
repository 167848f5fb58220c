use thiserror::Error;

use crate::models::StudentId;

/// Errors raised by scoring, decoding, and problem construction.
///
/// Validity repair and canonicalization never raise; they are the recovery
/// path for the preconditions these errors report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupingError {
    /// The roster/group-size combination cannot form equal-sized groups.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A chromosome or caller referenced a student id outside the roster.
    #[error("unknown student id {0}")]
    UnknownStudent(StudentId),

    /// A location key is absent from the backing distance table.
    #[error("unknown location '{0}'")]
    UnknownLocation(String),

    /// A group cannot be scored: fewer than two members, or a member whose
    /// learning-style vector has no magnitude.
    #[error("degenerate group: {0}")]
    DegenerateGroup(String),
}

pub type Result<T> = std::result::Result<T, GroupingError>;

//! Input validation for grouping problems.
//!
//! Checks structural integrity of a student roster before searching.
//! Detects:
//! - Duplicate or non-contiguous student ids
//! - Locations absent from the distance provider
//! - Learning-style vectors that cannot be compared (zero magnitude,
//!   mismatched dimensions)
//! - Populations that cannot be split into equal groups
//!
//! All problems are collected and reported together, so a bad input file
//! surfaces every issue in one pass rather than one per run.

use std::collections::HashSet;

use crate::geo::DistanceProvider;
use crate::models::Student;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two students share the same id.
    DuplicateId,
    /// Student ids do not form the dense range `[0, N)`.
    NonContiguousId,
    /// A student's location is unknown to the distance provider.
    UnknownLocation,
    /// A learning-style vector has zero magnitude (or no dimensions).
    DegenerateStyleVector,
    /// Students disagree on the number of learning-style dimensions.
    StyleDimensionMismatch,
    /// The population size is not a positive multiple of the group size.
    IndivisiblePopulation,
    /// The requested group size cannot hold a scorable group.
    InvalidGroupSize,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a grouping problem.
///
/// Checks:
/// 1. Group size is at least 2
/// 2. Population size is a positive multiple of the group size
/// 3. Student ids are unique and dense in `[0, N)`
/// 4. Every location resolves through the distance provider
/// 5. Every learning-style vector has magnitude and a consistent dimension
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input<D: DistanceProvider>(
    students: &[Student],
    distances: &D,
    group_size: usize,
) -> ValidationResult {
    let mut errors = Vec::new();

    if group_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGroupSize,
            format!("group size must be at least 2, got {group_size}"),
        ));
    } else if students.is_empty() || students.len() % group_size != 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::IndivisiblePopulation,
            format!(
                "{} student(s) cannot be split into groups of {group_size}",
                students.len()
            ),
        ));
    }

    let mut seen_ids = HashSet::new();
    for student in students {
        if !seen_ids.insert(student.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate student id: {}", student.id),
            ));
        }
        if student.id >= students.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonContiguousId,
                format!(
                    "student id {} outside the dense range [0, {})",
                    student.id,
                    students.len()
                ),
            ));
        }
    }

    for student in students {
        // A self-distance succeeds exactly when the key is known; the probe
        // stays inside the provider's narrow interface.
        if distances
            .distance_km(&student.location, &student.location)
            .is_err()
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownLocation,
                format!(
                    "student {} references unknown location '{}'",
                    student.id, student.location
                ),
            ));
        }
    }

    let style_dimensions = students.first().map(|s| s.learning_style.len());
    for student in students {
        let magnitude: f64 = student.learning_style.iter().map(|x| x * x).sum();
        if magnitude == 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::DegenerateStyleVector,
                format!("student {} has a zero-magnitude style vector", student.id),
            ));
        }
        if let Some(dims) = style_dimensions {
            if student.learning_style.len() != dims {
                errors.push(ValidationError::new(
                    ValidationErrorKind::StyleDimensionMismatch,
                    format!(
                        "student {} has {} style dimensions, expected {dims}",
                        student.id,
                        student.learning_style.len()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

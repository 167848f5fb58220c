//! Pairwise and group compatibility scoring.
//!
//! The pair score combines three terms: shared-module count, learning-style
//! cosine similarity, and a distance penalty. A group's score is the mean
//! over all of its unordered pairs, so groups of different sizes remain
//! comparable — the crossover operator ranks groups from different parents
//! against each other and must not let size bias the ranking.

use serde::{Deserialize, Serialize};

use crate::error::{GroupingError, Result};
use crate::geo::DistanceProvider;
use crate::models::Student;

/// Term weights of the pair score.
///
/// `pair = module_overlap · |A ∩ B| + learning_style · cos(a, b)
///        − distance · ⌈km⌉`
///
/// The module term is an unnormalized count: students enrolled in larger
/// module sets can reach higher overlap, which is intentional for this
/// domain. The distance term is a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityWeights {
    /// Points per shared module.
    pub module_overlap: f64,
    /// Multiplier on the learning-style cosine similarity.
    pub learning_style: f64,
    /// Penalty per whole kilometer of separation.
    pub distance: f64,
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self {
            module_overlap: 50.0,
            learning_style: 100.0,
            distance: 5.0,
        }
    }
}

/// Scores pairs and groups of students.
///
/// Owns the injected [`DistanceProvider`]; has no other state and no side
/// effects.
#[derive(Debug, Clone)]
pub struct CompatibilityScorer<D: DistanceProvider> {
    weights: CompatibilityWeights,
    distances: D,
}

impl<D: DistanceProvider> CompatibilityScorer<D> {
    /// Creates a scorer with the default weights.
    pub fn new(distances: D) -> Self {
        Self {
            weights: CompatibilityWeights::default(),
            distances,
        }
    }

    /// Overrides the term weights.
    pub fn with_weights(mut self, weights: CompatibilityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The active weights.
    pub fn weights(&self) -> CompatibilityWeights {
        self.weights
    }

    /// Compatibility of one pair of students.
    ///
    /// The provider's distance is rounded up to the next whole kilometer
    /// before weighting, matching the deployed scoring exactly; scores are
    /// bit-compatible only with that rounding in place.
    pub fn pair(&self, a: &Student, b: &Student) -> Result<f64> {
        let overlap = module_overlap(a, b) as f64;
        let style = cosine_similarity(&a.learning_style, &b.learning_style)?;
        let km = self.distances.distance_km(&a.location, &b.location)?.ceil();

        Ok(self.weights.module_overlap * overlap + self.weights.learning_style * style
            - self.weights.distance * km)
    }

    /// Mean pairwise compatibility of a group.
    ///
    /// Requires at least two members — a smaller group has no pairs to
    /// average and is reported as [`GroupingError::DegenerateGroup`].
    pub fn group(&self, members: &[&Student]) -> Result<f64> {
        let k = members.len();
        if k < 2 {
            return Err(GroupingError::DegenerateGroup(format!(
                "cannot score a group of {k} member(s); at least 2 required"
            )));
        }

        let mut total = 0.0;
        for i in 0..k {
            for j in (i + 1)..k {
                total += self.pair(members[i], members[j])?;
            }
        }

        let pairs = (k * (k - 1) / 2) as f64;
        Ok(total / pairs)
    }
}

/// Number of modules two students share.
pub fn module_overlap(a: &Student, b: &Student) -> usize {
    a.modules.intersection(&b.modules).count()
}

/// Cosine similarity of two learning-style vectors.
///
/// Undefined for a zero-magnitude vector (there is no direction to
/// compare), reported as [`GroupingError::DegenerateGroup`].
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(GroupingError::DegenerateGroup(format!(
            "learning-style dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Err(GroupingError::DegenerateGroup(
            "zero-magnitude learning-style vector".into(),
        ));
    }

    Ok(dot / (magnitude_a * magnitude_b))
}

//! Group-aware crossover.
//!
//! Ordinary positional crossover (single-point, uniform) would tear groups
//! apart and break the exactly-`G`-per-group invariant, so recombination
//! here inherits *whole groups*: the highest-compatibility groups of either
//! parent are adopted intact, and only the remainder is refilled at random.
//!
//! # Reference
//! Falkenauer (1994), "A Hybrid Grouping Genetic Algorithm for Bin Packing"

use rand::seq::SliceRandom;
use rand::Rng;

use super::chromosome::GroupingChromosome;
use crate::error::Result;
use crate::geo::DistanceProvider;
use crate::models::{Student, StudentId};
use crate::repository::StudentRepository;
use crate::scoring::CompatibilityScorer;

/// Placeholder for a student not yet adopted into the offspring.
const UNASSIGNED: usize = usize::MAX;

struct CandidateGroup {
    members: Vec<StudentId>,
    score: f64,
}

/// Produces one offspring from two parent partitions.
///
/// 1. Decode both parents and score every group, giving `2 · numGroups`
///    candidates in (parent, group-id) order.
/// 2. Stable-sort the candidates by score, best first, so ties keep input
///    order and a fixed seed reproduces the offspring exactly.
/// 3. Walk the ranking greedily: a candidate is adopted whole — never
///    partially — iff none of its members is already assigned.
/// 4. Shuffle the leftover students and pack them sequentially into fresh
///    groups of `group_size`.
/// 5. Canonicalize.
///
/// The parents are read-only; the offspring is a new value. Both parents
/// must decode through `roster`, and every decoded group must be scorable
/// (≥ 2 members), which valid parents guarantee.
pub fn group_crossover<R, D, G>(
    parent1: &GroupingChromosome,
    parent2: &GroupingChromosome,
    roster: &R,
    scorer: &CompatibilityScorer<D>,
    group_size: usize,
    rng: &mut G,
) -> Result<GroupingChromosome>
where
    R: StudentRepository,
    D: DistanceProvider,
    G: Rng,
{
    debug_assert_eq!(parent1.len(), parent2.len());
    let length = parent1.len();

    let mut candidates: Vec<CandidateGroup> = Vec::new();
    for parent in [parent1, parent2] {
        for members in parent.decode_groups().into_values() {
            let students: Vec<&Student> = members
                .iter()
                .map(|&id| roster.get(id))
                .collect::<Result<_>>()?;
            let score = scorer.group(&students)?;
            candidates.push(CandidateGroup { members, score });
        }
    }

    // Stable: equal scores keep their (parent, group-id) order.
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut offspring = vec![UNASSIGNED; length];
    let mut next_group = 0usize;
    for candidate in &candidates {
        let all_free = candidate
            .members
            .iter()
            .all(|&id| offspring[id] == UNASSIGNED);
        if all_free {
            for &id in &candidate.members {
                offspring[id] = next_group;
            }
            next_group += 1;
        }
    }

    let mut leftover: Vec<StudentId> = (0..length)
        .filter(|&id| offspring[id] == UNASSIGNED)
        .collect();
    leftover.shuffle(rng);

    // One running counter across the whole leftover list, so a partial
    // group simply continues into the next id.
    let mut members_in_group = 0usize;
    for id in leftover {
        offspring[id] = next_group;
        members_in_group += 1;
        if members_in_group == group_size {
            next_group += 1;
            members_in_group = 0;
        }
    }

    let mut child = GroupingChromosome::from_genes(offspring);
    child.canonicalize();
    Ok(child)
}

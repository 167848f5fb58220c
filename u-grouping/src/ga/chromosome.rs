//! Partition chromosome for the grouping GA.
//!
//! # Encoding
//!
//! One gene per student: `genes[i]` is the group id of student `i`. A
//! chromosome of length `N` with group size `G` is *valid* when every id in
//! `[0, N/G)` occurs exactly `G` times and ids are dense in first-appearance
//! order (id `k` never appears before every id `< k` has appeared). The
//! canonical form relabels ids by first appearance, so two chromosomes that
//! induce the same partition compare equal regardless of label choice.
//!
//! # Reference
//! Falkenauer (1998), "Genetic Algorithms and Grouping Problems"

use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;
use u_evolve::Individual;

use crate::models::StudentId;

/// Group-assignment chromosome.
///
/// Lower fitness = better under the engine's minimization convention; the
/// grouping problem stores the negated mean compatibility here.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingChromosome {
    /// Group id per student position.
    pub genes: Vec<usize>,
    /// Engine fitness (negated compatibility; `INFINITY` = unevaluated).
    pub fitness: f64,
}

impl Individual for GroupingChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl GroupingChromosome {
    /// Wraps an assignment array as an unevaluated chromosome.
    pub fn from_genes(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Creates a random valid chromosome.
    ///
    /// Shuffles the identity permutation, integer-divides each entry by
    /// `group_size`, then canonicalizes — valid by construction whenever
    /// `length` is a multiple of `group_size`.
    pub fn random<R: Rng>(length: usize, group_size: usize, rng: &mut R) -> Self {
        debug_assert!(group_size > 0);
        let mut order: Vec<usize> = (0..length).collect();
        order.shuffle(rng);

        let mut chromosome =
            Self::from_genes(order.into_iter().map(|n| n / group_size).collect());
        chromosome.canonicalize();
        chromosome
    }

    /// Number of genes (= students).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome is empty.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Checks the equal-group-size partition invariant.
    ///
    /// Fails closed: any out-of-range id, any id appearing before all
    /// smaller ids have appeared, or any occurrence count other than
    /// `group_size` makes the chromosome invalid.
    pub fn is_valid(&self, group_size: usize) -> bool {
        if group_size == 0 {
            return false;
        }
        let num_groups = self.genes.len() / group_size;
        let mut occurrences = vec![0usize; num_groups];
        let mut next_fresh = 0usize;

        for &gene in &self.genes {
            if gene >= num_groups || gene > next_fresh {
                return false;
            }
            if gene == next_fresh {
                next_fresh += 1;
            }
            occurrences[gene] += 1;
        }

        occurrences.iter().all(|&count| count == group_size)
    }

    /// Restores the partition invariant in place.
    ///
    /// Out-of-range ids are clamped to 0, then a shuffled list of missing
    /// slots (one entry per absent member of an under-full group) is drained
    /// into surplus positions, scanning circularly from a random start. The
    /// replacement's count is intentionally not re-incremented: the list
    /// length equals the total surplus, so the scan cannot over-correct.
    ///
    /// The slot filling can leave labels out of first-appearance order, so
    /// the repair ends with [`canonicalize`](Self::canonicalize); on an
    /// already-valid chromosome the whole operation is the identity.
    ///
    /// One full scan suffices whenever the length is a multiple of
    /// `group_size`. Never raises; repair is the recovery path for the
    /// scoring preconditions.
    pub fn repair<R: Rng>(&mut self, group_size: usize, rng: &mut R) {
        let length = self.genes.len();
        if length == 0 || group_size == 0 {
            return;
        }
        let num_groups = length / group_size;
        if num_groups == 0 {
            return;
        }

        let mut occurrences = vec![0usize; num_groups];
        for gene in &mut self.genes {
            if *gene >= num_groups {
                *gene = 0;
            }
            occurrences[*gene] += 1;
        }

        let mut missing: Vec<usize> = Vec::new();
        for (group, &count) in occurrences.iter().enumerate() {
            for _ in count..group_size {
                missing.push(group);
            }
        }
        missing.shuffle(rng);

        let mut position = rng.random_range(0..length);
        for _ in 0..length {
            let current = self.genes[position];
            if occurrences[current] > group_size {
                let replacement = missing
                    .pop()
                    .expect("missing-slot list covers every surplus occurrence");
                self.genes[position] = replacement;
                occurrences[current] -= 1;
            }
            position = (position + 1) % length;
        }

        self.canonicalize();
    }

    /// Relabels group ids to first-appearance order starting at 0, in place.
    ///
    /// Deterministic and idempotent; label-permuted chromosomes of the same
    /// partition canonicalize to the same array.
    pub fn canonicalize(&mut self) {
        let mut relabel: HashMap<usize, usize> = HashMap::new();
        for gene in &mut self.genes {
            let fresh = relabel.len();
            *gene = *relabel.entry(*gene).or_insert(fresh);
        }
    }

    /// Decodes the chromosome into group id → member ids, in one pass.
    ///
    /// Tolerates invalid chromosomes (arbitrary ids, uneven groups); the
    /// result simply reflects whatever assignment the genes hold.
    pub fn decode_groups(&self) -> BTreeMap<usize, Vec<StudentId>> {
        let mut groups: BTreeMap<usize, Vec<StudentId>> = BTreeMap::new();
        for (student, &gene) in self.genes.iter().enumerate() {
            groups.entry(gene).or_default().push(student);
        }
        groups
    }
}

/// Swap mutation: exchanges two uniformly chosen positions, then
/// canonicalizes.
///
/// The positions are drawn with replacement and may coincide; the swap is
/// then a no-op. Swapping preserves occurrence counts, so a valid chromosome
/// stays valid.
pub fn swap_mutation<R: Rng>(chromosome: &mut GroupingChromosome, rng: &mut R) {
    let length = chromosome.genes.len();
    if length < 2 {
        return;
    }
    let i = rng.random_range(0..length);
    let j = rng.random_range(0..length);
    chromosome.genes.swap(i, j);
    chromosome.canonicalize();
}

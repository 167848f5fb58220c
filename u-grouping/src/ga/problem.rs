//! Grouping GA problem definition.
//!
//! Implements `u_evolve::EvolutionProblem` for group formation, bridging the
//! domain (roster, compatibility scoring) to the generic engine. The engine
//! minimizes, so the bridge scores a chromosome as the *negated* mean group
//! compatibility; [`GroupingGaProblem::fitness`] and
//! [`GroupingGaProblem::decode`] expose the positive domain view.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_evolve::EvolutionProblem;

use super::chromosome::{swap_mutation, GroupingChromosome};
use super::operators::group_crossover;
use crate::error::{GroupingError, Result};
use crate::geo::DistanceProvider;
use crate::models::{Grouping, Student, StudyGroup};
use crate::repository::StudentRepository;
use crate::scoring::CompatibilityScorer;

/// GA problem for partitioning a roster into equal-sized groups.
///
/// Construction validates everything `evaluate` relies on — divisibility of
/// the roster by the group size and scorability of every student (known
/// location, usable learning-style vector) — so the evolutionary loop never
/// trips over configuration mistakes mid-run.
///
/// # Example
/// ```no_run
/// use u_evolve::{EvolutionConfig, EvolutionRunner};
/// use u_grouping::ga::GroupingGaProblem;
/// use u_grouping::geo::LocationTable;
/// use u_grouping::repository::StudentRoster;
/// use u_grouping::scoring::CompatibilityScorer;
///
/// # fn demo(roster: StudentRoster, table: LocationTable) -> u_grouping::error::Result<()> {
/// let scorer = CompatibilityScorer::new(table);
/// let problem = GroupingGaProblem::new(roster, scorer, 5)?;
/// let result = EvolutionRunner::run(&problem, &EvolutionConfig::default().with_seed(42));
/// let grouping = problem.decode(&result.best)?;
/// println!("mean compatibility: {:.1}", grouping.mean_compatibility());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GroupingGaProblem<R, D>
where
    R: StudentRepository,
    D: DistanceProvider,
{
    roster: R,
    scorer: CompatibilityScorer<D>,
    group_size: usize,
    repair_before_scoring: bool,
    repair_seed: u64,
}

impl<R, D> GroupingGaProblem<R, D>
where
    R: StudentRepository,
    D: DistanceProvider,
{
    /// Creates a problem over `roster` with groups of `group_size`.
    ///
    /// Fails with [`GroupingError::InvalidConfiguration`] when the roster
    /// size is not a positive multiple of `group_size` or `group_size < 2`,
    /// and with the underlying scoring error when any student cannot be
    /// scored (unknown location, zero-magnitude style vector).
    pub fn new(roster: R, scorer: CompatibilityScorer<D>, group_size: usize) -> Result<Self> {
        if group_size < 2 {
            return Err(GroupingError::InvalidConfiguration(format!(
                "group size must be at least 2, got {group_size}"
            )));
        }
        let population = roster.len();
        if population == 0 || population % group_size != 0 {
            return Err(GroupingError::InvalidConfiguration(format!(
                "roster of {population} cannot be split into groups of {group_size}"
            )));
        }

        // Fail fast on anything that would poison scoring mid-search: the
        // self-pair exercises the location lookup and the style cosine.
        let style_dimensions = roster.get(0)?.learning_style.len();
        for id in 0..population {
            let student = roster.get(id)?;
            if student.learning_style.len() != style_dimensions {
                return Err(GroupingError::InvalidConfiguration(format!(
                    "student {id} has {} learning-style dimensions, expected {style_dimensions}",
                    student.learning_style.len()
                )));
            }
            scorer.pair(student, student)?;
        }

        Ok(Self {
            roster,
            scorer,
            group_size,
            repair_before_scoring: false,
            repair_seed: 0,
        })
    }

    /// Enables or disables repairing invalid chromosomes before scoring.
    ///
    /// Off (the default), validity is a caller/driver precondition and a
    /// chromosome whose decode yields an unscorable group simply receives
    /// the worst fitness. On, `evaluate` repairs a *clone* before scoring —
    /// the driver-owned individual is never modified.
    pub fn with_repair_before_scoring(mut self, repair: bool) -> Self {
        self.repair_before_scoring = repair;
        self
    }

    /// Seed mixed into the deterministic per-chromosome repair RNG.
    ///
    /// `evaluate` may run in parallel and cannot share the driver's RNG, so
    /// repair randomness is derived from this seed and the gene content —
    /// reproducible for a fixed seed, independent of evaluation order.
    pub fn with_repair_seed(mut self, seed: u64) -> Self {
        self.repair_seed = seed;
        self
    }

    /// Configured group size.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Number of groups a valid chromosome encodes.
    pub fn group_count(&self) -> usize {
        self.roster.len() / self.group_size
    }

    /// The injected roster.
    pub fn roster(&self) -> &R {
        &self.roster
    }

    /// Mean group compatibility of a chromosome (higher = better).
    ///
    /// Decodes in one pass and scores every group through the repository.
    /// Does not validate or repair its input; an invalid chromosome either
    /// scores over its actual (uneven) groups or fails with
    /// [`GroupingError::DegenerateGroup`].
    pub fn fitness(&self, chromosome: &GroupingChromosome) -> Result<f64> {
        Ok(self.decode(chromosome)?.mean_compatibility())
    }

    /// Decodes a chromosome into a reportable [`Grouping`].
    ///
    /// This is the only solution format: the best chromosome of a run is
    /// re-decoded through the repository whenever group membership is
    /// needed.
    pub fn decode(&self, chromosome: &GroupingChromosome) -> Result<Grouping> {
        if chromosome.len() != self.roster.len() {
            return Err(GroupingError::InvalidConfiguration(format!(
                "chromosome length {} does not match roster size {}",
                chromosome.len(),
                self.roster.len()
            )));
        }

        let mut groups = Vec::new();
        for (id, members) in chromosome.decode_groups() {
            let students: Vec<&Student> = members
                .iter()
                .map(|&member| self.roster.get(member))
                .collect::<Result<_>>()?;
            let compatibility = self.scorer.group(&students)?;
            groups.push(StudyGroup {
                id,
                members,
                compatibility,
            });
        }
        Ok(Grouping { groups })
    }

    fn repair_rng(&self, chromosome: &GroupingChromosome) -> StdRng {
        let mut hasher = DefaultHasher::new();
        chromosome.genes.hash(&mut hasher);
        StdRng::seed_from_u64(self.repair_seed ^ hasher.finish())
    }
}

impl<R, D> EvolutionProblem for GroupingGaProblem<R, D>
where
    R: StudentRepository,
    D: DistanceProvider,
{
    type Individual = GroupingChromosome;

    fn create_individual<G: Rng>(&self, rng: &mut G) -> GroupingChromosome {
        GroupingChromosome::random(self.roster.len(), self.group_size, rng)
    }

    fn evaluate(&self, individual: &GroupingChromosome) -> f64 {
        let scored = if self.repair_before_scoring && !individual.is_valid(self.group_size) {
            let mut repaired = individual.clone();
            repaired.repair(self.group_size, &mut self.repair_rng(individual));
            log::debug!("repaired invalid chromosome before scoring");
            self.fitness(&repaired)
        } else {
            self.fitness(individual)
        };

        match scored {
            Ok(compatibility) => -compatibility,
            Err(err) => {
                log::warn!("chromosome received worst fitness: {err}");
                f64::INFINITY
            }
        }
    }

    fn crossover<G: Rng>(
        &self,
        parent1: &GroupingChromosome,
        parent2: &GroupingChromosome,
        rng: &mut G,
    ) -> Vec<GroupingChromosome> {
        match group_crossover(
            parent1,
            parent2,
            &self.roster,
            &self.scorer,
            self.group_size,
            rng,
        ) {
            Ok(child) => vec![child],
            Err(err) => {
                // Construction validated the roster, so this only triggers
                // on structurally broken parents; keep the loop alive.
                log::warn!("crossover fell back to cloning a parent: {err}");
                vec![parent1.clone()]
            }
        }
    }

    fn mutate<G: Rng>(&self, individual: &mut GroupingChromosome, rng: &mut G) {
        swap_mutation(individual, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        log::info!(
            "generation {generation}: best mean compatibility {:.3}",
            -best_fitness
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LocationTable;
    use crate::repository::StudentRoster;
    use u_evolve::{EvolutionConfig, EvolutionRunner};

    fn table() -> LocationTable {
        LocationTable::new()
            .with_location("Bishan", 1.3513, 103.8487)
            .with_location("Clementi", 1.3151, 103.7652)
            .with_location("Tampines", 1.3546, 103.9432)
            .with_location("Woodlands", 1.4370, 103.7865)
    }

    fn roster(n: usize) -> StudentRoster {
        let locations = ["Bishan", "Clementi", "Tampines", "Woodlands"];
        let modules = ["CS1010", "CS2030", "MA1521", "ST2334", "GEA1000", "IS1108"];
        let students = (0..n)
            .map(|id| {
                let style = [
                    1.0 + (id % 3) as f64,
                    (id % 5) as f64 - 2.0,
                    1.0,
                    (id % 2) as f64,
                ];
                Student::new(id)
                    .with_learning_style(style)
                    .with_location(locations[id % locations.len()])
                    .with_modules(modules.iter().skip(id % 3).take(4).copied())
            })
            .collect();
        StudentRoster::new(students).unwrap()
    }

    fn problem(n: usize, group_size: usize) -> GroupingGaProblem<StudentRoster, LocationTable> {
        GroupingGaProblem::new(roster(n), CompatibilityScorer::new(table()), group_size).unwrap()
    }

    #[test]
    fn test_indivisible_roster_rejected() {
        let err =
            GroupingGaProblem::new(roster(21), CompatibilityScorer::new(table()), 5).unwrap_err();
        assert!(matches!(err, GroupingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_group_size_below_two_rejected() {
        let err =
            GroupingGaProblem::new(roster(20), CompatibilityScorer::new(table()), 1).unwrap_err();
        assert!(matches!(err, GroupingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_unknown_location_rejected_at_construction() {
        let students = vec![
            Student::new(0)
                .with_learning_style([1.0, 0.0, 0.0, 0.0])
                .with_location("Atlantis"),
            Student::new(1)
                .with_learning_style([1.0, 0.0, 0.0, 0.0])
                .with_location("Bishan"),
        ];
        let roster = StudentRoster::new(students).unwrap();
        let err = GroupingGaProblem::new(roster, CompatibilityScorer::new(table()), 2).unwrap_err();
        assert!(matches!(err, GroupingError::UnknownLocation(_)));
    }

    #[test]
    fn test_zero_style_vector_rejected_at_construction() {
        let students = vec![
            Student::new(0)
                .with_learning_style([0.0, 0.0, 0.0, 0.0])
                .with_location("Bishan"),
            Student::new(1)
                .with_learning_style([1.0, 0.0, 0.0, 0.0])
                .with_location("Bishan"),
        ];
        let roster = StudentRoster::new(students).unwrap();
        let err = GroupingGaProblem::new(roster, CompatibilityScorer::new(table()), 2).unwrap_err();
        assert!(matches!(err, GroupingError::DegenerateGroup(_)));
    }

    #[test]
    fn test_fitness_is_mean_of_group_scores() {
        let problem = problem(4, 2);
        let chromosome = GroupingChromosome::from_genes(vec![0, 0, 1, 1]);

        let scorer = CompatibilityScorer::new(table());
        let r = roster(4);
        let expected = (scorer
            .group(&[r.get(0).unwrap(), r.get(1).unwrap()])
            .unwrap()
            + scorer
                .group(&[r.get(2).unwrap(), r.get(3).unwrap()])
                .unwrap())
            / 2.0;

        let fitness = problem.fitness(&chromosome).unwrap();
        assert!((fitness - expected).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_negates_fitness() {
        let problem = problem(10, 5);
        let chromosome = GroupingChromosome::from_genes(vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
        let fitness = problem.fitness(&chromosome).unwrap();
        assert_eq!(problem.evaluate(&chromosome), -fitness);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let problem = problem(10, 5);
        let short = GroupingChromosome::from_genes(vec![0, 0, 1, 1]);
        assert!(matches!(
            problem.fitness(&short),
            Err(GroupingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_degenerate_decode_scores_worst_without_repair() {
        let problem = problem(4, 2);
        // Group 1 has a single member.
        let lopsided = GroupingChromosome::from_genes(vec![0, 0, 0, 1]);
        assert_eq!(problem.evaluate(&lopsided), f64::INFINITY);
    }

    #[test]
    fn test_repair_before_scoring_recovers_invalid() {
        let problem = problem(4, 2).with_repair_before_scoring(true);
        let lopsided = GroupingChromosome::from_genes(vec![0, 0, 0, 1]);

        let first = problem.evaluate(&lopsided);
        assert!(first.is_finite());
        // Content-derived repair seed: re-evaluation is reproducible.
        assert_eq!(problem.evaluate(&lopsided), first);
        // The driver-owned chromosome is untouched.
        assert_eq!(lopsided.genes, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_decode_reports_groups() {
        let problem = problem(10, 5);
        let chromosome = GroupingChromosome::from_genes(vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1]);
        let grouping = problem.decode(&chromosome).unwrap();

        assert_eq!(grouping.groups.len(), 2);
        assert_eq!(grouping.members_of(0), Some(&[0, 2, 4, 6, 8][..]));
        assert_eq!(grouping.members_of(1), Some(&[1, 3, 5, 7, 9][..]));
        let fitness = problem.fitness(&chromosome).unwrap();
        assert!((grouping.mean_compatibility() - fitness).abs() < 1e-9);
    }

    #[test]
    fn test_create_individual_is_valid() {
        let problem = problem(20, 5);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let chromosome = problem.create_individual(&mut rng);
            assert!(chromosome.is_valid(5));
        }
    }

    #[test]
    fn test_full_search_produces_valid_best() {
        let problem = problem(20, 5);
        let config = EvolutionConfig::default()
            .with_population_size(24)
            .with_max_generations(15)
            .with_mutation_rate(1.0)
            .with_stagnation_limit(0)
            .with_seed(42)
            .with_parallel(false);

        let result = EvolutionRunner::run(&problem, &config);
        assert!(result.best.is_valid(5));
        assert!(result.best_fitness.is_finite());
        for window in result.fitness_history.windows(2) {
            assert!(window[1] <= window[0]);
        }

        let grouping = problem.decode(&result.best).unwrap();
        assert_eq!(grouping.groups.len(), 4);
        for group in &grouping.groups {
            assert_eq!(group.members.len(), 5);
        }
    }
}

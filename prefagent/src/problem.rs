//! Preference problems.
use log::info;
use rand::seq::index;
use rand::Rng;
use thiserror::Error;

use prefagent_dsl::{AttributeTable, CnfFormula, PenaltyRule, QualitativeRule};

use crate::config::ProblemConfig;
use crate::dominance::{
    compare_degrees, compare_penalties, penalty_optimal, qualitative_optimal, Comparison,
};
use crate::feasibility::{feasible_objects, HardConstraints};
use crate::object::{generate, Object, ObjectId};
use crate::oracle::{OracleError, SatOracle};
use crate::penalty::PenaltyTable;
use crate::qualitative::QualitativeTable;
use crate::rules::RuleRegistry;

/// Possible errors while constructing or querying a problem.
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error(
        "Problem has {} attributes, at most {} are supported (see max_attributes)",
        count,
        max
    )]
    TooManyAttributes { count: usize, max: usize },
    #[error("Rule '{}' is declared more than once", name)]
    DuplicateRule { name: String },
    #[error("Comparing objects needs at least two feasible objects, found {}", feasible)]
    EmptySample { feasible: usize },
    #[error("Total penalty of object o{} exceeds {}", object, u64::max_value())]
    PenaltyOverflow { object: ObjectId },
    #[error("Object o{} is not feasible", object)]
    NotFeasible { object: ObjectId },
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Upper bound for [`ProblemConfig::max_attributes`], larger settings are clamped.
pub const MAX_ATTRIBUTES: usize = usize::BITS as usize - 1;

/// Two sampled feasible objects and how they compare.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Exemplification {
    pub first: ObjectId,
    pub second: ObjectId,
    pub outcome: Comparison,
}

/// A fully evaluated preference problem.
///
/// All objects are generated, tested for feasibility and scored under both theories once, during
/// construction. Every query afterwards only reads the cached results.
#[derive(Debug)]
pub struct PreferenceProblem {
    attributes: AttributeTable,
    rules: RuleRegistry,
    objects: Vec<Object>,
    feasible: Vec<ObjectId>,
    penalty_table: PenaltyTable,
    qualitative_table: QualitativeTable,
}

impl PreferenceProblem {
    /// Evaluate a problem.
    ///
    /// `hard_constraints` are the user's constraints, the per-attribute base clauses are added
    /// here.
    pub fn new(
        config: &ProblemConfig,
        attributes: AttributeTable,
        hard_constraints: &CnfFormula,
        penalty_rules: Vec<PenaltyRule>,
        qualitative_rules: Vec<QualitativeRule>,
        oracle: &mut impl SatOracle,
    ) -> Result<PreferenceProblem, ProblemError> {
        // The object space is indexed by usize.
        let max_attributes = config.max_attributes.min(MAX_ATTRIBUTES);
        if attributes.len() > max_attributes {
            return Err(ProblemError::TooManyAttributes {
                count: attributes.len(),
                max: max_attributes,
            });
        }

        let rules = RuleRegistry::new(penalty_rules, qualitative_rules)?;
        let objects = generate(&attributes);

        let constraints = HardConstraints::new(hard_constraints, attributes.len());
        let feasible = feasible_objects(oracle, &constraints, &objects)?;

        let penalty_table = PenaltyTable::score(oracle, rules.penalty_rules(), &objects, &feasible)?;
        let qualitative_table =
            QualitativeTable::score(oracle, rules.qualitative_rules(), &objects, &feasible)?;

        info!(
            "Scored {} feasible objects against {} penalty and {} qualitative rules",
            feasible.len(),
            rules.penalty_rules().len(),
            rules.qualitative_rules().len()
        );

        Ok(PreferenceProblem {
            attributes,
            rules,
            objects,
            feasible,
            penalty_table,
            qualitative_table,
        })
    }

    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// All objects, indexed by id.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Ids of the feasible objects in increasing order.
    pub fn feasible(&self) -> &[ObjectId] {
        &self.feasible
    }

    pub fn feasible_count(&self) -> usize {
        self.feasible.len()
    }

    pub fn is_feasible(&self, id: ObjectId) -> bool {
        self.feasible.binary_search(&id).is_ok()
    }

    /// Applied and total penalties of all feasible objects.
    pub fn penalty_table(&self) -> &PenaltyTable {
        &self.penalty_table
    }

    /// Satisfaction degrees of all feasible objects.
    pub fn qualitative_table(&self) -> &QualitativeTable {
        &self.qualitative_table
    }

    /// Compare two feasible objects by total penalty.
    pub fn compare_by_penalty(
        &self,
        first: ObjectId,
        second: ObjectId,
    ) -> Result<Comparison, ProblemError> {
        let total = |object| {
            self.penalty_table
                .total(object)
                .ok_or(ProblemError::NotFeasible { object })
        };
        Ok(compare_penalties(total(first)?, total(second)?))
    }

    /// Compare two feasible objects by satisfaction degrees.
    pub fn compare_by_degrees(
        &self,
        first: ObjectId,
        second: ObjectId,
    ) -> Result<Comparison, ProblemError> {
        let degrees = |object| {
            self.qualitative_table
                .degrees(object)
                .ok_or(ProblemError::NotFeasible { object })
        };
        Ok(compare_degrees(degrees(first)?, degrees(second)?))
    }

    /// Sample two distinct feasible objects uniformly.
    pub fn sample_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(ObjectId, ObjectId), ProblemError> {
        if self.feasible.len() < 2 {
            return Err(ProblemError::EmptySample {
                feasible: self.feasible.len(),
            });
        }
        let sample = index::sample(rng, self.feasible.len(), 2);
        Ok((self.feasible[sample.index(0)], self.feasible[sample.index(1)]))
    }

    /// Sample two feasible objects and compare them by total penalty.
    pub fn penalty_exemplification<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Exemplification, ProblemError> {
        let (first, second) = self.sample_pair(rng)?;
        Ok(Exemplification {
            first,
            second,
            outcome: self.compare_by_penalty(first, second)?,
        })
    }

    /// Sample two feasible objects and compare them by satisfaction degrees.
    pub fn qualitative_exemplification<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Exemplification, ProblemError> {
        let (first, second) = self.sample_pair(rng)?;
        Ok(Exemplification {
            first,
            second,
            outcome: self.compare_by_degrees(first, second)?,
        })
    }

    /// Feasible objects with minimal total penalty.
    pub fn penalty_optimal(&self) -> Vec<ObjectId> {
        penalty_optimal(&self.penalty_table)
    }

    /// Feasible objects not dominated under qualitative choice logic.
    pub fn qualitative_optimal(&self) -> Vec<ObjectId> {
        qualitative_optimal(&self.qualitative_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use prefagent_dsl::compile;
    use prefagent_dsl::parse::{parse_penalty_rule, parse_qualitative_rule};

    use crate::oracle::VarisatOracle;

    fn table() -> AttributeTable {
        let mut table = AttributeTable::new();
        table.add("Size", "big", "small").unwrap();
        table.add("Color", "red", "blue").unwrap();
        table
    }

    fn problem(constraints: &str) -> PreferenceProblem {
        let table = table();
        let hard = compile(&table, constraints).unwrap();
        let penalty = vec![
            parse_penalty_rule(&table, 1, "big, 3").unwrap(),
            parse_penalty_rule(&table, 2, "red, 2").unwrap(),
        ];
        let qualitative = vec![
            parse_qualitative_rule(&table, 1, "big BT small").unwrap(),
            parse_qualitative_rule(&table, 2, "blue BT red").unwrap(),
        ];
        PreferenceProblem::new(
            &ProblemConfig::default(),
            table,
            &hard,
            penalty,
            qualitative,
            &mut VarisatOracle::new(),
        )
        .unwrap()
    }

    #[test]
    fn evaluates_once_on_construction() {
        let problem = problem("big OR red");

        assert_eq!(problem.objects().len(), 4);
        assert_eq!(problem.feasible(), &[1, 2, 3]);
        assert!(!problem.is_feasible(0));

        let totals: Vec<u64> = problem.penalty_table().rows.iter().map(|r| r.total).collect();
        assert_eq!(totals, vec![3, 2, 0]);

        assert_eq!(problem.penalty_optimal(), vec![3]);
        // o1 = small, red; o2 = big, blue; o3 = big, red
        assert_eq!(problem.qualitative_optimal(), vec![2]);
    }

    #[test]
    fn pairwise_comparisons() {
        let problem = problem("big OR red");

        assert_eq!(
            problem.compare_by_penalty(1, 3).unwrap(),
            Comparison::SecondPreferred
        );
        assert_eq!(
            problem.compare_by_degrees(1, 2).unwrap(),
            Comparison::SecondPreferred
        );
        assert_eq!(
            problem.compare_by_degrees(2, 3).unwrap(),
            Comparison::FirstPreferred
        );
        match problem.compare_by_penalty(0, 1) {
            Err(ProblemError::NotFeasible { object: 0 }) => (),
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn sampling_picks_distinct_feasible_objects() {
        let problem = problem("big OR red");
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..50 {
            let (first, second) = problem.sample_pair(&mut rng).unwrap();
            assert_ne!(first, second);
            assert!(problem.is_feasible(first));
            assert!(problem.is_feasible(second));
        }

        let example = problem.penalty_exemplification(&mut rng).unwrap();
        assert_eq!(
            example.outcome,
            problem.compare_by_penalty(example.first, example.second).unwrap()
        );
    }

    #[test]
    fn sampling_needs_two_feasible_objects() {
        let mut rng = StdRng::seed_from_u64(3);

        match problem("big AND red").sample_pair(&mut rng) {
            Err(ProblemError::EmptySample { feasible: 1 }) => (),
            other => panic!("Unexpected result {:?}", other),
        }
        match problem("big AND small").qualitative_exemplification(&mut rng) {
            Err(ProblemError::EmptySample { feasible: 0 }) => (),
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn unsatisfiable_constraints_degrade_to_empty_reports() {
        let problem = problem("big AND small");

        assert_eq!(problem.feasible_count(), 0);
        assert!(problem.penalty_table().rows.is_empty());
        assert!(problem.qualitative_table().rows.is_empty());
        assert!(problem.penalty_optimal().is_empty());
        assert!(problem.qualitative_optimal().is_empty());
        assert_eq!(problem.penalty_table().rules.len(), 2);
    }

    #[test]
    fn attribute_limit() {
        let table = table();
        let config = ProblemConfig {
            max_attributes: 1,
            ..ProblemConfig::default()
        };

        let result = PreferenceProblem::new(
            &config,
            table,
            &CnfFormula::new(),
            vec![],
            vec![],
            &mut VarisatOracle::new(),
        );

        match result {
            Err(ProblemError::TooManyAttributes { count: 2, max: 1 }) => (),
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn attribute_limit_is_clamped_to_the_index_width() {
        let mut table = AttributeTable::new();
        for i in 0..=MAX_ATTRIBUTES {
            table
                .add(format!("A{}", i), format!("a{}", i), format!("na{}", i))
                .unwrap();
        }
        let config = ProblemConfig {
            max_attributes: 100,
            ..ProblemConfig::default()
        };

        let result = PreferenceProblem::new(
            &config,
            table,
            &CnfFormula::new(),
            vec![],
            vec![],
            &mut VarisatOracle::new(),
        );

        match result {
            Err(ProblemError::TooManyAttributes { count, max }) => {
                assert_eq!(count, MAX_ATTRIBUTES + 1);
                assert_eq!(max, MAX_ATTRIBUTES);
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }
}

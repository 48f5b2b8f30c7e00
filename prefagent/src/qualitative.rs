//! Qualitative choice logic.
//!
//! A qualitative rule lists alternatives from most to least preferred. An object's satisfaction
//! degree for a rule is the rank of the best alternative it satisfies. Conditional rules only
//! apply to objects satisfying their condition, every other object is unsatisfied.
use std::fmt;

use log::debug;

use prefagent_dsl::QualitativeRule;

use crate::object::{Object, ObjectId};
use crate::oracle::{OracleError, SatOracle};

/// Satisfaction degree of an object for a single qualitative rule.
///
/// Ordered from best to worst: `Tier(1) < Tier(2) < ... < Unsatisfied`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Degree {
    /// The 1-based rank of the best satisfied tier.
    Tier(usize),
    /// The rule does not apply or no tier is satisfied.
    Unsatisfied,
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Degree::Tier(rank) => write!(f, "{}", rank),
            Degree::Unsatisfied => write!(f, "inf"),
        }
    }
}

/// Satisfaction degree of `object` for `rule`.
pub fn degree(
    oracle: &mut impl SatOracle,
    rule: &QualitativeRule,
    object: &Object,
) -> Result<Degree, OracleError> {
    if let Some(condition) = &rule.condition {
        if !oracle.is_satisfiable(&object.pinned(condition))? {
            return Ok(Degree::Unsatisfied);
        }
    }

    for (index, tier) in rule.tiers.iter().enumerate() {
        if oracle.is_satisfiable(&object.pinned(tier))? {
            return Ok(Degree::Tier(index + 1));
        }
    }

    Ok(Degree::Unsatisfied)
}

/// Degrees of a single object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualitativeRow {
    pub object: ObjectId,
    /// Degree per rule, in rule order.
    pub degrees: Vec<Degree>,
}

/// Satisfaction degrees of all feasible objects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QualitativeTable {
    /// Rule names, in rule order.
    pub rules: Vec<String>,
    /// One row per feasible object, in object order.
    pub rows: Vec<QualitativeRow>,
}

impl QualitativeTable {
    /// Evaluate every rule on every listed object.
    pub fn score(
        oracle: &mut impl SatOracle,
        rules: &[QualitativeRule],
        objects: &[Object],
        feasible: &[ObjectId],
    ) -> Result<QualitativeTable, OracleError> {
        let mut rows = Vec::with_capacity(feasible.len());

        for &id in feasible {
            let object = &objects[id];
            let degrees = rules
                .iter()
                .map(|rule| degree(oracle, rule, object))
                .collect::<Result<Vec<_>, _>>()?;

            debug!("{}: degrees {:?}", object.name(), degrees);

            rows.push(QualitativeRow {
                object: id,
                degrees,
            });
        }

        Ok(QualitativeTable {
            rules: rules.iter().map(|rule| rule.name.clone()).collect(),
            rows,
        })
    }

    /// Degree vector of a scored object.
    pub fn degrees(&self, object: ObjectId) -> Option<&[Degree]> {
        self.rows
            .binary_search_by_key(&object, |row| row.object)
            .ok()
            .map(|index| &self.rows[index].degrees[..])
    }
}

//! Penalty logic.
//!
//! Every penalty rule charges its penalty to each object that violates the rule's formula. The
//! total penalty of an object is the sum over all rules, lower totals are preferred. A total that
//! does not fit into a `u64` is reported as [`ProblemError::PenaltyOverflow`].
use log::debug;

use prefagent_dsl::PenaltyRule;

use crate::object::{Object, ObjectId};
use crate::oracle::{OracleError, SatOracle};
use crate::problem::ProblemError;

/// Penalty charged to `object` by `rule`.
///
/// Zero if the object satisfies the rule's formula, the rule's penalty otherwise.
pub fn applied_penalty(
    oracle: &mut impl SatOracle,
    rule: &PenaltyRule,
    object: &Object,
) -> Result<u64, OracleError> {
    if oracle.is_satisfiable(&object.pinned(&rule.formula))? {
        Ok(0)
    } else {
        Ok(rule.penalty)
    }
}

/// Penalties of a single object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PenaltyRow {
    pub object: ObjectId,
    /// Applied penalty per rule, in rule order.
    pub penalties: Vec<u64>,
    pub total: u64,
}

/// Applied and total penalties of all feasible objects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PenaltyTable {
    /// Rule names, in rule order.
    pub rules: Vec<String>,
    /// One row per feasible object, in object order.
    pub rows: Vec<PenaltyRow>,
}

impl PenaltyTable {
    /// Evaluate every rule on every listed object exactly once.
    pub fn score(
        oracle: &mut impl SatOracle,
        rules: &[PenaltyRule],
        objects: &[Object],
        feasible: &[ObjectId],
    ) -> Result<PenaltyTable, ProblemError> {
        let mut rows = Vec::with_capacity(feasible.len());

        for &id in feasible {
            let object = &objects[id];
            let penalties = rules
                .iter()
                .map(|rule| applied_penalty(oracle, rule, object))
                .collect::<Result<Vec<_>, _>>()?;
            let total = penalties
                .iter()
                .try_fold(0u64, |total, &penalty| total.checked_add(penalty))
                .ok_or(ProblemError::PenaltyOverflow { object: id })?;

            debug!("{}: penalties {:?}, total {}", object.name(), penalties, total);

            rows.push(PenaltyRow {
                object: id,
                penalties,
                total,
            });
        }

        Ok(PenaltyTable {
            rules: rules.iter().map(|rule| rule.name.clone()).collect(),
            rows,
        })
    }

    /// Total penalty of a scored object.
    pub fn total(&self, object: ObjectId) -> Option<u64> {
        self.row(object).map(|row| row.total)
    }

    pub fn row(&self, object: ObjectId) -> Option<&PenaltyRow> {
        self.rows
            .binary_search_by_key(&object, |row| row.object)
            .ok()
            .map(|index| &self.rows[index])
    }
}

//! Registry of compiled preference rules.
use std::collections::HashSet;

use prefagent_dsl::{PenaltyRule, QualitativeRule};

use crate::problem::ProblemError;

/// The penalty and qualitative rules of a problem, in declaration order.
///
/// Rule names are used as report column keys, so they have to be unique within each theory.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    penalty: Vec<PenaltyRule>,
    qualitative: Vec<QualitativeRule>,
}

impl RuleRegistry {
    pub fn new(
        penalty: Vec<PenaltyRule>,
        qualitative: Vec<QualitativeRule>,
    ) -> Result<RuleRegistry, ProblemError> {
        check_unique(penalty.iter().map(|rule| rule.name.as_str()))?;
        check_unique(qualitative.iter().map(|rule| rule.name.as_str()))?;

        Ok(RuleRegistry {
            penalty,
            qualitative,
        })
    }

    pub fn penalty_rules(&self) -> &[PenaltyRule] {
        &self.penalty
    }

    pub fn qualitative_rules(&self) -> &[QualitativeRule] {
        &self.qualitative
    }
}

fn check_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), ProblemError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ProblemError::DuplicateRule {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

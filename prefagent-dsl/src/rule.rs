//! Penalty logic and qualitative choice logic rules.
use varisat_formula::CnfFormula;

/// A weighted rule of penalty logic.
///
/// An object violating `formula` is charged `penalty`.
#[derive(Debug)]
pub struct PenaltyRule {
    /// The rule's formula text, used as report key.
    pub name: String,
    pub formula: CnfFormula,
    pub penalty: u64,
}

/// A prioritized rule of qualitative choice logic.
///
/// `tiers` are the alternatives of the rule from most to least preferred. The 1-based position of
/// a tier is its rank. When `condition` is present the rule only applies to objects satisfying it.
#[derive(Debug)]
pub struct QualitativeRule {
    /// The rule's full text, used as report key.
    pub name: String,
    pub tiers: Vec<CnfFormula>,
    pub condition: Option<CnfFormula>,
}

impl QualitativeRule {
    /// Whether the rule only applies under a condition.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}

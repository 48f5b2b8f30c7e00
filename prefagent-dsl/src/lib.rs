//! Attribute tables and the preference formula language of PrefAgent.
//!
//! A preference problem is described over a small set of binary attributes, each with two named
//! value labels. Hard constraints, penalty rules and qualitative choice rules are written as
//! propositional formulas over those labels:
//!
//! ```text
//! Size: big, small
//! big OR NOT red AND cheap
//! big BT small IF cheap
//! ```
//!
//! Formulas are compiled into a [`CnfFormula`](varisat_formula::CnfFormula) whose variables are
//! the 1-based attribute indices. A label registered as the first value of its attribute is the
//! positive literal of that variable, the second value is the negative literal.

use thiserror::Error;

pub mod attribute;
pub mod compile;
pub mod parse;
pub mod rule;

pub use attribute::{Attribute, AttributeTable, LabelRef};
pub use compile::{compile, NEGATION_MARKER};
pub use parse::ParserError;
pub use rule::{PenaltyRule, QualitativeRule};

pub use varisat_formula::{CnfFormula, Lit, Var};

/// Possible errors while registering attributes or compiling a formula.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DslError {
    #[error("Unknown value label '{}'", label)]
    UnknownLabel { label: String },
    #[error(
        "Malformed literal '{}': expected a label or '{} label' but found {} tokens",
        literal,
        NEGATION_MARKER,
        tokens
    )]
    MalformedClause { literal: String, tokens: usize },
    #[error(
        "Invalid negation '{}' in literal '{}', expected '{}'",
        marker,
        literal,
        NEGATION_MARKER
    )]
    InvalidNegation { marker: String, literal: String },
    #[error("Value label '{}' is registered more than once", label)]
    DuplicateLabel { label: String },
}

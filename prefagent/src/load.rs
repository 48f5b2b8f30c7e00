//! Loading problems from their four input files.
use std::io;

use anyhow::Error;
use log::info;

use prefagent_dsl::parse::{
    read_attributes, read_constraints, read_penalty_rules, read_qualitative_rules,
};

use crate::config::ProblemConfig;
use crate::oracle::SatOracle;
use crate::problem::PreferenceProblem;

/// Sources of a preference problem.
pub struct ProblemInput<A, C, P, Q> {
    pub attributes: A,
    pub constraints: C,
    pub penalty_rules: P,
    pub qualitative_rules: Q,
}

/// Read and evaluate a problem.
///
/// The attribute declarations are read first as every other input refers to their labels.
pub fn load_problem(
    config: &ProblemConfig,
    input: ProblemInput<impl io::Read, impl io::Read, impl io::Read, impl io::Read>,
    oracle: &mut impl SatOracle,
) -> Result<PreferenceProblem, Error> {
    let attributes = read_attributes(input.attributes)?;
    info!("Read {} attributes", attributes.len());

    let constraints = read_constraints(&attributes, input.constraints)?;
    let penalty_rules = read_penalty_rules(&attributes, input.penalty_rules)?;
    let qualitative_rules = read_qualitative_rules(&attributes, input.qualitative_rules)?;

    info!(
        "Read {} constraint clauses, {} penalty rules and {} qualitative rules",
        constraints.len(),
        penalty_rules.len(),
        qualitative_rules.len()
    );

    Ok(PreferenceProblem::new(
        config,
        attributes,
        &constraints,
        penalty_rules,
        qualitative_rules,
        oracle,
    )?)
}

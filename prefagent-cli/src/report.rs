//! Reasoning task reports.
use std::io::Write;
use std::iter::once;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use rand::Rng;

use prefagent::{Comparison, ObjectId, PreferenceProblem};

use crate::table::Table;

/// Preference logic used for tables, exemplification and optimization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Logic {
    Penalty,
    Qualitative,
}

impl FromStr for Logic {
    type Err = Error;

    fn from_str(name: &str) -> Result<Logic, Error> {
        match &name.to_ascii_lowercase()[..] {
            "penalty" => Ok(Logic::Penalty),
            "qualitative" => Ok(Logic::Qualitative),
            _ => Err(anyhow!("Unknown preference logic '{}'", name)),
        }
    }
}

fn name(id: ObjectId) -> String {
    format!("o{}", id)
}

/// List every object with its labels.
pub fn encoding(problem: &PreferenceProblem, out: &mut impl Write) -> Result<(), Error> {
    for object in problem.objects() {
        writeln!(out, "{}", object)?;
    }
    Ok(())
}

pub fn feasibility(problem: &PreferenceProblem, out: &mut impl Write) -> Result<(), Error> {
    match problem.feasible_count() {
        0 => writeln!(out, "No feasible objects.")?,
        count => writeln!(out, "Yes, there are {} feasible objects.", count)?,
    }
    Ok(())
}

/// Score table of all feasible objects.
pub fn table(
    problem: &PreferenceProblem,
    logic: Logic,
    out: &mut impl Write,
) -> Result<(), Error> {
    let table = match logic {
        Logic::Penalty => {
            let scores = problem.penalty_table();
            let header = once("encoding".to_owned())
                .chain(scores.rules.iter().cloned())
                .chain(once("total penalty".to_owned()))
                .collect();
            let rows = scores
                .rows
                .iter()
                .map(|row| {
                    once(name(row.object))
                        .chain(row.penalties.iter().map(|penalty| penalty.to_string()))
                        .chain(once(row.total.to_string()))
                        .collect()
                })
                .collect();
            Table::new(header, rows)
        }
        Logic::Qualitative => {
            let scores = problem.qualitative_table();
            let header = once("encoding".to_owned())
                .chain(scores.rules.iter().cloned())
                .collect();
            let rows = scores
                .rows
                .iter()
                .map(|row| {
                    once(name(row.object))
                        .chain(row.degrees.iter().map(|degree| degree.to_string()))
                        .collect()
                })
                .collect();
            Table::new(header, rows)
        }
    };

    write!(out, "{}", table)?;
    Ok(())
}

/// Compare two randomly sampled feasible objects.
pub fn exemplify(
    problem: &PreferenceProblem,
    logic: Logic,
    rng: &mut impl Rng,
    out: &mut impl Write,
) -> Result<(), Error> {
    let example = match logic {
        Logic::Penalty => problem.penalty_exemplification(rng)?,
        Logic::Qualitative => problem.qualitative_exemplification(rng)?,
    };
    let first = name(example.first);
    let second = name(example.second);

    writeln!(
        out,
        "Two randomly selected feasible objects are {} and {},",
        first, second
    )?;

    match (logic, example.outcome) {
        (_, Comparison::FirstPreferred) => {
            writeln!(out, "and {} is strictly preferred over {}.", first, second)?
        }
        (_, Comparison::SecondPreferred) => {
            writeln!(out, "and {} is strictly preferred over {}.", second, first)?
        }
        (Logic::Penalty, _) => writeln!(out, "{} and {} are equivalent.", first, second)?,
        (Logic::Qualitative, Comparison::Equal) => {
            writeln!(out, "and {} and {} are equal.", first, second)?
        }
        (Logic::Qualitative, Comparison::Incomparable) => {
            writeln!(out, "and {} and {} are incomparable.", first, second)?
        }
    }

    Ok(())
}

/// List all optimal feasible objects.
pub fn optimize(
    problem: &PreferenceProblem,
    logic: Logic,
    out: &mut impl Write,
) -> Result<(), Error> {
    let optimal = match logic {
        Logic::Penalty => problem.penalty_optimal(),
        Logic::Qualitative => problem.qualitative_optimal(),
    };
    let names: Vec<String> = optimal.into_iter().map(name).collect();
    writeln!(out, "All optimal objects: {}", names.join(", "))?;
    Ok(())
}

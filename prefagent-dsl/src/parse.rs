//! Line oriented readers for attribute, constraint and rule files.
//!
//! Every reader trims its input lines and skips blank lines as well as lines starting with `#`.
use std::io::{self, BufRead};

use anyhow::Error;
use log::debug;
use thiserror::Error;

use varisat_formula::{CnfFormula, Lit, Var};

use crate::attribute::AttributeTable;
use crate::compile::compile;
use crate::rule::{PenaltyRule, QualitativeRule};
use crate::DslError;

/// Separates the tiers of a qualitative rule.
const BETTER_THAN: &str = " BT ";
/// Introduces the condition of a qualitative rule.
const CONDITION: &str = " IF ";

/// Possible errors while reading problem files.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error(
        "line {}: Invalid attribute declaration '{}', expected 'Category: label, label'",
        line,
        text
    )]
    InvalidAttribute { line: usize, text: String },
    #[error(
        "line {}: Invalid penalty rule '{}', expected 'formula, penalty'",
        line,
        text
    )]
    InvalidPenaltyRule { line: usize, text: String },
    #[error("line {}: Invalid penalty '{}', expected a non-negative integer", line, value)]
    InvalidPenalty { line: usize, value: String },
    #[error("line {}: {}", line, cause)]
    Dsl {
        line: usize,
        #[source]
        cause: DslError,
    },
}

impl ParserError {
    fn dsl(line: usize) -> impl FnOnce(DslError) -> ParserError {
        move |cause| ParserError::Dsl { line, cause }
    }
}

/// Non-empty, non-comment lines with their 1-based line numbers.
fn content_lines(input: impl io::Read) -> impl Iterator<Item = io::Result<(usize, String)>> {
    io::BufReader::new(input)
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    None
                } else {
                    Some(Ok((index + 1, line.to_owned())))
                }
            }
            Err(err) => Some(Err(err)),
        })
}

/// Parse an attribute declaration `Category: true_label, false_label` and register it.
pub fn parse_attribute(
    table: &mut AttributeTable,
    line: usize,
    text: &str,
) -> Result<Var, ParserError> {
    let invalid = || ParserError::InvalidAttribute {
        line,
        text: text.to_owned(),
    };

    let (category, labels) = text.split_once(':').ok_or_else(invalid)?;
    let category = category.trim();
    let labels: Vec<&str> = labels.split(',').map(str::trim).collect();

    match labels[..] {
        [true_label, false_label]
            if !category.is_empty() && !true_label.is_empty() && !false_label.is_empty() =>
        {
            table
                .add(category, true_label, false_label)
                .map_err(ParserError::dsl(line))
        }
        _ => Err(invalid()),
    }
}

/// Parse a penalty rule `formula, penalty`.
pub fn parse_penalty_rule(
    table: &AttributeTable,
    line: usize,
    text: &str,
) -> Result<PenaltyRule, ParserError> {
    let (formula_text, penalty_text) =
        text.rsplit_once(',')
            .ok_or_else(|| ParserError::InvalidPenaltyRule {
                line,
                text: text.to_owned(),
            })?;

    let penalty_text = penalty_text.trim();
    let penalty = penalty_text
        .parse::<u64>()
        .map_err(|_| ParserError::InvalidPenalty {
            line,
            value: penalty_text.to_owned(),
        })?;

    let name = formula_text.trim();
    let formula = compile(table, name).map_err(ParserError::dsl(line))?;

    Ok(PenaltyRule {
        name: name.to_owned(),
        formula,
        penalty,
    })
}

/// Parse a qualitative choice rule `tier BT tier ... [IF condition]`.
///
/// A dangling `IF` without a condition leaves the rule unconditional.
pub fn parse_qualitative_rule(
    table: &AttributeTable,
    line: usize,
    text: &str,
) -> Result<QualitativeRule, ParserError> {
    let name = text.trim();
    let unconditional = name.strip_suffix(CONDITION.trim_end()).unwrap_or(name);

    let (choice_text, condition_text) = match unconditional.split_once(CONDITION) {
        Some((choice, condition)) if !condition.trim().is_empty() => (choice, Some(condition)),
        Some((choice, _)) => (choice, None),
        None => (unconditional, None),
    };

    let tiers = choice_text
        .split(BETTER_THAN)
        .map(|tier| compile(table, tier))
        .collect::<Result<Vec<_>, _>>()
        .map_err(ParserError::dsl(line))?;

    let condition = condition_text
        .map(|condition| compile(table, condition))
        .transpose()
        .map_err(ParserError::dsl(line))?;

    Ok(QualitativeRule {
        name: name.to_owned(),
        tiers,
        condition,
    })
}

/// Read attribute declarations, one per line.
pub fn read_attributes(input: impl io::Read) -> Result<AttributeTable, Error> {
    let mut table = AttributeTable::new();
    for line in content_lines(input) {
        let (line, text) = line?;
        parse_attribute(&mut table, line, &text)?;
    }
    debug!("Read {} attributes", table.len());
    Ok(table)
}

/// Read hard constraints, one formula per line.
///
/// The clauses of all lines are concatenated in file order.
pub fn read_constraints(table: &AttributeTable, input: impl io::Read) -> Result<CnfFormula, Error> {
    let mut clauses: Vec<Vec<Lit>> = vec![];
    for line in content_lines(input) {
        let (line, text) = line?;
        let formula = compile(table, &text).map_err(ParserError::dsl(line))?;
        clauses.extend(formula.iter().map(|clause| clause.to_vec()));
    }

    let mut constraints = CnfFormula::from(clauses);
    constraints.set_var_count(table.len());
    debug!("Read {} constraint clauses", constraints.len());
    Ok(constraints)
}

/// Read penalty rules, one per line.
pub fn read_penalty_rules(
    table: &AttributeTable,
    input: impl io::Read,
) -> Result<Vec<PenaltyRule>, Error> {
    let mut rules = vec![];
    for line in content_lines(input) {
        let (line, text) = line?;
        rules.push(parse_penalty_rule(table, line, &text)?);
    }
    debug!("Read {} penalty rules", rules.len());
    Ok(rules)
}

/// Read qualitative choice rules, one per line.
pub fn read_qualitative_rules(
    table: &AttributeTable,
    input: impl io::Read,
) -> Result<Vec<QualitativeRule>, Error> {
    let mut rules = vec![];
    for line in content_lines(input) {
        let (line, text) = line?;
        rules.push(parse_qualitative_rule(table, line, &text)?);
    }
    debug!("Read {} qualitative rules", rules.len());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Error;

    const ATTRIBUTES: &[u8] = b"Size: big, small\n\n# second attribute\nColor: red, blue\n";

    fn table() -> AttributeTable {
        read_attributes(ATTRIBUTES).unwrap()
    }

    fn clauses(formula: &CnfFormula) -> Vec<Vec<isize>> {
        formula
            .iter()
            .map(|clause| clause.iter().map(|lit| lit.to_dimacs()).collect())
            .collect()
    }

    macro_rules! expect_error {
        ( $result:expr, $( $cases:tt )* ) => {
            match $result {
                Ok(parsed) => panic!("Expected error but got {:?}", parsed),
                Err(err) => match err.downcast_ref() {
                    Some(casted_err) => match casted_err {
                        $( $cases )*,
                        _ => panic!("Unexpected error {:?}", casted_err),
                    },
                    None => panic!("Unexpected error type {:?}", err),
                }
            }
        };
    }

    #[test]
    fn attributes() {
        let table = table();

        assert_eq!(table.len(), 2);
        let color = table.attribute(Var::from_dimacs(2)).unwrap();
        assert_eq!(color.category, "Color");
        assert_eq!(color.true_label, "red");
        assert_eq!(color.false_label, "blue");
    }

    #[test]
    fn invalid_attributes() {
        expect_error!(read_attributes(b"Size big, small" as &[_]),
            ParserError::InvalidAttribute { line: 1, .. } => ());
        expect_error!(read_attributes(b"Size: big\n" as &[_]),
            ParserError::InvalidAttribute { line: 1, .. } => ());
        expect_error!(read_attributes(b"Size: big, small, tiny\n" as &[_]),
            ParserError::InvalidAttribute { .. } => ());
        expect_error!(read_attributes(b": big, small\n" as &[_]),
            ParserError::InvalidAttribute { .. } => ());
        expect_error!(read_attributes(b"Size: big, \n" as &[_]),
            ParserError::InvalidAttribute { .. } => ());
        expect_error!(
            read_attributes(b"Size: big, small\n\nColor: red, big\n" as &[_]),
            ParserError::Dsl { line: 3, cause: DslError::DuplicateLabel { .. } } => ()
        );
    }

    #[test]
    fn constraints_concatenate_lines() -> Result<(), Error> {
        let table = table();
        let constraints = read_constraints(&table, b"big OR red\n\nNOT red AND small\n" as &[_])?;

        assert_eq!(clauses(&constraints), vec![vec![1, 2], vec![-2], vec![-1]]);
        assert_eq!(constraints.var_count(), 2);

        let empty = read_constraints(&table, b"" as &[_])?;
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.var_count(), 2);

        Ok(())
    }

    #[test]
    fn constraint_errors_carry_line_numbers() {
        let table = table();
        expect_error!(
            read_constraints(&table, b"big\n# comment\ngreen\n" as &[_]),
            ParserError::Dsl { line: 3, cause: DslError::UnknownLabel { .. } } => ()
        );
    }

    #[test]
    fn penalty_rules() -> Result<(), Error> {
        let table = table();
        let rules = read_penalty_rules(&table, b"big OR red, 5\nNOT blue AND small,3\n" as &[_])?;

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].name, "big OR red");
        assert_eq!(rules[0].penalty, 5);
        assert_eq!(clauses(&rules[0].formula), vec![vec![1, 2]]);
        assert_eq!(rules[1].name, "NOT blue AND small");
        assert_eq!(rules[1].penalty, 3);
        assert_eq!(clauses(&rules[1].formula), vec![vec![2], vec![-1]]);

        Ok(())
    }

    #[test]
    fn invalid_penalty_rules() {
        let table = table();
        expect_error!(read_penalty_rules(&table, b"big 5" as &[_]),
            ParserError::InvalidPenaltyRule { line: 1, .. } => ());
        expect_error!(read_penalty_rules(&table, b"big, -5" as &[_]),
            ParserError::InvalidPenalty { line: 1, .. } => ());
        expect_error!(read_penalty_rules(&table, b"big, five" as &[_]),
            ParserError::InvalidPenalty { .. } => ());
        expect_error!(read_penalty_rules(&table, b"big, 1\nhuge, 2" as &[_]),
            ParserError::Dsl { line: 2, cause: DslError::UnknownLabel { .. } } => ());
    }

    #[test]
    fn qualitative_rules() -> Result<(), Error> {
        let table = table();
        let rules = read_qualitative_rules(
            &table,
            b"big BT small IF red\nred AND big BT blue OR small\nblue BT red IF\n" as &[_],
        )?;

        assert_eq!(rules.len(), 3);

        assert_eq!(rules[0].name, "big BT small IF red");
        assert_eq!(rules[0].tiers.len(), 2);
        assert_eq!(clauses(&rules[0].tiers[0]), vec![vec![1]]);
        assert_eq!(clauses(&rules[0].tiers[1]), vec![vec![-1]]);
        assert_eq!(
            rules[0].condition.as_ref().map(clauses),
            Some(vec![vec![2]])
        );

        assert_eq!(clauses(&rules[1].tiers[0]), vec![vec![2], vec![1]]);
        assert_eq!(clauses(&rules[1].tiers[1]), vec![vec![-2, -1]]);
        assert!(!rules[1].is_conditional());

        assert_eq!(rules[2].name, "blue BT red IF");
        assert_eq!(rules[2].tiers.len(), 2);
        assert!(!rules[2].is_conditional());

        Ok(())
    }

    #[test]
    fn invalid_qualitative_rules() {
        let table = table();
        expect_error!(read_qualitative_rules(&table, b"big BT  BT small" as &[_]),
            ParserError::Dsl { line: 1, cause: DslError::MalformedClause { .. } } => ());
        expect_error!(read_qualitative_rules(&table, b"big BT small IF green" as &[_]),
            ParserError::Dsl { cause: DslError::UnknownLabel { .. }, .. } => ());
    }
}

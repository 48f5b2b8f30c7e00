//! Formula compiler.
//!
//! A formula is a conjunction of clauses separated by ` AND `, each clause a disjunction of
//! literals separated by ` OR `. A literal is either a bare value label, asserting that label, or
//! the negation marker followed by a label, denying it. There are no parentheses and no
//! precedence beyond `AND` binding weaker than `OR`, which makes every formula CNF by
//! construction.
use varisat_formula::{CnfFormula, Lit};

use crate::attribute::AttributeTable;
use crate::DslError;

/// Token that negates the following label. Matched case-insensitively.
pub const NEGATION_MARKER: &str = "NOT";

/// Separates clauses.
pub(crate) const CONJUNCTION: &str = " AND ";
/// Separates literals within a clause.
pub(crate) const DISJUNCTION: &str = " OR ";

/// Compile a formula over the labels of `table`.
///
/// Clauses appear in the order of the ` AND `-split and literals in the order of the ` OR `-split.
/// The variable count of the result is the number of attributes in `table`, so the formula always
/// spans the full attribute universe.
pub fn compile(table: &AttributeTable, text: &str) -> Result<CnfFormula, DslError> {
    let mut clauses: Vec<Vec<Lit>> = vec![];

    for clause_text in text.trim().split(CONJUNCTION) {
        let clause = clause_text
            .split(DISJUNCTION)
            .map(|literal| compile_literal(table, literal))
            .collect::<Result<Vec<_>, _>>()?;
        clauses.push(clause);
    }

    let mut formula = CnfFormula::from(clauses);
    formula.set_var_count(table.len());
    Ok(formula)
}

/// Compile a single literal token group.
fn compile_literal(table: &AttributeTable, literal: &str) -> Result<Lit, DslError> {
    let tokens: Vec<&str> = literal.split_whitespace().collect();

    match tokens[..] {
        [label] => Ok(table.resolve(label)?.lit()),
        [marker, label] => {
            if !marker.eq_ignore_ascii_case(NEGATION_MARKER) {
                return Err(DslError::InvalidNegation {
                    marker: marker.to_owned(),
                    literal: literal.trim().to_owned(),
                });
            }
            Ok(!table.resolve(label)?.lit())
        }
        _ => Err(DslError::MalformedClause {
            literal: literal.trim().to_owned(),
            tokens: tokens.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use varisat_formula::lits;

    fn table() -> AttributeTable {
        let mut table = AttributeTable::new();
        table.add("Size", "big", "small").unwrap();
        table.add("Color", "red", "blue").unwrap();
        table.add("Price", "cheap", "expensive").unwrap();
        table
    }

    fn clauses(formula: &CnfFormula) -> Vec<Vec<isize>> {
        formula
            .iter()
            .map(|clause| clause.iter().map(|lit| lit.to_dimacs()).collect())
            .collect()
    }

    #[test]
    fn single_labels() {
        let table = table();

        assert_eq!(clauses(&compile(&table, "big").unwrap()), vec![vec![1]]);
        assert_eq!(clauses(&compile(&table, "small").unwrap()), vec![vec![-1]]);
        assert_eq!(clauses(&compile(&table, "NOT big").unwrap()), vec![vec![-1]]);
        assert_eq!(clauses(&compile(&table, "not small").unwrap()), vec![vec![1]]);
    }

    #[test]
    fn clause_and_literal_order_is_kept() {
        let table = table();

        let formula = compile(&table, "expensive OR red AND NOT cheap AND small OR NOT blue OR big")
            .unwrap();

        assert_eq!(
            clauses(&formula),
            vec![vec![-3, 2], vec![-3], vec![-1, 2, 1]]
        );
        assert_eq!(formula.var_count(), 3);
        assert_eq!(formula.len(), 3);
    }

    #[test]
    fn formula_spans_all_attributes() {
        let table = table();

        let formula = compile(&table, "big").unwrap();

        assert_eq!(formula.var_count(), 3);
        assert_eq!(formula.iter().next().unwrap(), &lits![1][..]);
    }

    #[test]
    fn surrounding_whitespace() {
        let table = table();

        assert_eq!(
            clauses(&compile(&table, "  big  OR   NOT  red \n").unwrap()),
            vec![vec![1, -2]]
        );
    }

    #[test]
    fn unknown_label() {
        let table = table();

        assert_eq!(
            compile(&table, "big AND green"),
            Err(DslError::UnknownLabel {
                label: "green".to_owned()
            })
        );
        assert_eq!(
            compile(&table, "NOT green OR big"),
            Err(DslError::UnknownLabel {
                label: "green".to_owned()
            })
        );
    }

    #[test]
    fn malformed_literals() {
        let table = table();

        assert_eq!(
            compile(&table, "big OR NOT very red"),
            Err(DslError::MalformedClause {
                literal: "NOT very red".to_owned(),
                tokens: 3
            })
        );
        assert_eq!(
            compile(&table, ""),
            Err(DslError::MalformedClause {
                literal: "".to_owned(),
                tokens: 0
            })
        );
        assert_eq!(
            compile(&table, "big AND  AND red"),
            Err(DslError::MalformedClause {
                literal: "".to_owned(),
                tokens: 0
            })
        );
    }

    #[test]
    fn invalid_negation() {
        let table = table();

        assert_eq!(
            compile(&table, "NO big"),
            Err(DslError::InvalidNegation {
                marker: "NO".to_owned(),
                literal: "NO big".to_owned()
            })
        );
    }

    proptest! {
        #[test]
        fn negation_flips_single_literals(
            index in 0..3usize,
            first in proptest::bool::ANY,
            negated in proptest::bool::ANY,
        ) {
            let table = table();
            let attribute = table.iter().nth(index).unwrap();
            let label = attribute.label(first);

            let text = if negated {
                format!("NOT {}", label)
            } else {
                label.to_owned()
            };

            let expected = (index as isize + 1) * if first != negated { 1 } else { -1 };

            prop_assert_eq!(clauses(&compile(&table, &text).unwrap()), vec![vec![expected]]);
        }
    }
}

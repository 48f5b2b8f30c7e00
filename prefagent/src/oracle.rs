//! Satisfiability queries.
//!
//! All reasoning about objects is reduced to two questions about CNF formulas: whether a formula
//! is satisfiable and which full assignments satisfy it.
use log::debug;
use thiserror::Error;

use varisat::solver::{Solver, SolverError};
use varisat::{CnfFormula, ExtendFormula, Lit};

/// Possible errors while querying a SAT oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("SAT solver failed: {}", cause)]
    Solver {
        #[from]
        cause: SolverError,
    },
    #[error("SAT solver reported a satisfiable formula without a model")]
    MissingModel,
}

/// Decides satisfiability of CNF formulas.
pub trait SatOracle {
    /// Whether `formula` has a satisfying assignment.
    fn is_satisfiable(&mut self, formula: &CnfFormula) -> Result<bool, OracleError>;

    /// All satisfying assignments of `formula`.
    ///
    /// Each model contains exactly one literal per variable of `formula`, ordered by variable.
    /// An unsatisfiable formula has no models.
    fn enumerate_models(&mut self, formula: &CnfFormula) -> Result<Vec<Vec<Lit>>, OracleError>;
}

/// [`SatOracle`] backed by varisat.
///
/// Every query runs on a fresh solver instance.
#[derive(Default)]
pub struct VarisatOracle {
    queries: u64,
}

impl VarisatOracle {
    pub fn new() -> VarisatOracle {
        VarisatOracle::default()
    }

    /// Number of queries answered so far.
    pub fn queries(&self) -> u64 {
        self.queries
    }
}

impl SatOracle for VarisatOracle {
    fn is_satisfiable(&mut self, formula: &CnfFormula) -> Result<bool, OracleError> {
        self.queries += 1;

        let mut solver = Solver::new();
        solver.add_formula(formula);
        Ok(solver.solve()?)
    }

    fn enumerate_models(&mut self, formula: &CnfFormula) -> Result<Vec<Vec<Lit>>, OracleError> {
        self.queries += 1;

        let mut solver = Solver::new();
        solver.add_formula(formula);

        let mut models = vec![];

        while solver.solve()? {
            let model = solver.model().ok_or(OracleError::MissingModel)?;

            // Exclude this model from all further solutions
            let blocking_clause: Vec<Lit> = model.iter().map(|&lit| !lit).collect();
            solver.add_clause(&blocking_clause);

            models.push(model);
        }

        debug!(
            "Enumerated {} models over {} variables",
            models.len(),
            formula.var_count()
        );

        Ok(models)
    }
}

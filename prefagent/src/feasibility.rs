//! Partitioning the object space into feasible and infeasible objects.
use std::collections::HashSet;

use log::info;

use varisat::{CnfFormula, Lit, Var};

use crate::object::{Object, ObjectId};
use crate::oracle::{OracleError, SatOracle};

/// Hard constraints of a problem.
///
/// Besides the user's clauses this contains a tautological clause `-i OR i` for every attribute,
/// so that models enumerated by the oracle assign every attribute.
#[derive(Debug)]
pub struct HardConstraints {
    formula: CnfFormula,
}

impl HardConstraints {
    /// Extend `constraints` with the per-attribute base clauses.
    pub fn new(constraints: &CnfFormula, attribute_count: usize) -> HardConstraints {
        let mut clauses: Vec<Vec<Lit>> = constraints.iter().map(|clause| clause.to_vec()).collect();
        clauses.extend((0..attribute_count).map(|index| {
            let var = Var::from_index(index);
            vec![var.negative(), var.positive()]
        }));

        let mut formula = CnfFormula::from(clauses);
        formula.set_var_count(attribute_count);
        HardConstraints { formula }
    }

    pub fn formula(&self) -> &CnfFormula {
        &self.formula
    }
}

/// Ids of all objects satisfying the hard constraints, in object order.
///
/// Uses a single model enumeration. An object is feasible iff its literal vector equals one of the
/// models. Unsatisfiable constraints yield an empty set, not an error.
pub fn feasible_objects(
    oracle: &mut impl SatOracle,
    constraints: &HardConstraints,
    objects: &[Object],
) -> Result<Vec<ObjectId>, OracleError> {
    let models: HashSet<Vec<Lit>> = oracle
        .enumerate_models(constraints.formula())?
        .into_iter()
        .collect();

    let feasible: Vec<ObjectId> = objects
        .iter()
        .filter(|object| models.contains(&object.literals))
        .map(|object| object.id)
        .collect();

    info!(
        "{} models, {} of {} objects are feasible",
        models.len(),
        feasible.len(),
        objects.len()
    );

    Ok(feasible)
}

//! The enumerated object space.
use std::fmt;

use log::info;

use prefagent_dsl::AttributeTable;
use varisat::{CnfFormula, Lit, Var};

/// Index of an object in the object space.
pub type ObjectId = usize;

/// One full assignment of all attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    pub id: ObjectId,
    /// Binary encoding of `id`, the first attribute is the most significant bit.
    pub bitstring: String,
    /// The chosen label per attribute.
    pub labels: Vec<String>,
    /// The chosen literal per attribute, in variable order.
    pub literals: Vec<Lit>,
}

impl Object {
    /// Display name used in reports.
    pub fn name(&self) -> String {
        format!("o{}", self.id)
    }

    /// Extends `formula` with one unit clause per attribute, fixing the object's assignment.
    ///
    /// The resulting formula is satisfiable iff the object satisfies `formula`.
    pub fn pinned(&self, formula: &CnfFormula) -> CnfFormula {
        let mut clauses: Vec<Vec<Lit>> = formula.iter().map(|clause| clause.to_vec()).collect();
        clauses.extend(self.literals.iter().map(|&lit| vec![lit]));

        let mut pinned = CnfFormula::from(clauses);
        pinned.set_var_count(formula.var_count());
        pinned
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.name(), self.labels.join(", "))
    }
}

/// Enumerate all 2^n assignments of the attributes in `table`, in increasing id order.
pub fn generate(table: &AttributeTable) -> Vec<Object> {
    let width = table.len();
    let count = 1usize << width;

    let objects: Vec<Object> = (0..count)
        .map(|id| {
            let bitstring = if width == 0 {
                String::new()
            } else {
                format!("{:0width$b}", id, width = width)
            };

            let (labels, literals): (Vec<String>, Vec<Lit>) = table
                .iter()
                .zip(bitstring.bytes())
                .enumerate()
                .map(|(index, (attribute, bit))| {
                    let polarity = bit == b'1';
                    (
                        attribute.label(polarity).to_owned(),
                        Var::from_index(index).lit(polarity),
                    )
                })
                .unzip();

            Object {
                id,
                bitstring,
                labels,
                literals,
            }
        })
        .collect();

    info!(
        "Generated {} objects over {} attributes",
        objects.len(),
        width
    );

    objects
}

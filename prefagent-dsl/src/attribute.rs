//! Attributes and their value labels.
use std::collections::HashMap;
use std::fmt;

use varisat_formula::{Lit, Var};

use crate::DslError;

/// A binary attribute with two mutually exclusive value labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub category: String,
    /// Label asserted by the positive literal of the attribute's variable.
    pub true_label: String,
    /// Label asserted by the negative literal of the attribute's variable.
    pub false_label: String,
}

impl Attribute {
    /// The label selected by a polarity of this attribute's variable.
    pub fn label(&self, polarity: bool) -> &str {
        if polarity {
            &self.true_label
        } else {
            &self.false_label
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {}, {}",
            self.category, self.true_label, self.false_label
        )
    }
}

/// Where a value label points to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LabelRef {
    /// The attribute's variable.
    pub var: Var,
    /// The binary code the label was registered with.
    ///
    /// `true` for the first label of an attribute, `false` for the second.
    pub bit: bool,
}

impl LabelRef {
    /// The literal asserting this label.
    pub fn lit(self) -> Lit {
        self.var.lit(self.bit)
    }
}

/// Ordered list of attributes with a label index.
///
/// The position of an attribute is its variable, i.e. the first attribute is DIMACS variable 1.
/// Labels are unique across the whole table, so a label alone identifies both the attribute and
/// the polarity it asserts.
#[derive(Clone, Debug, Default)]
pub struct AttributeTable {
    attributes: Vec<Attribute>,
    labels: HashMap<String, LabelRef>,
}

impl AttributeTable {
    /// Create an empty table.
    pub fn new() -> AttributeTable {
        AttributeTable::default()
    }

    /// Register a new attribute and return its variable.
    ///
    /// Fails without modifying the table if either label is already known or both labels are the
    /// same.
    pub fn add(
        &mut self,
        category: impl Into<String>,
        true_label: impl Into<String>,
        false_label: impl Into<String>,
    ) -> Result<Var, DslError> {
        let true_label = true_label.into();
        let false_label = false_label.into();

        for label in [&true_label, &false_label].iter() {
            if self.labels.contains_key(label.as_str()) {
                return Err(DslError::DuplicateLabel {
                    label: (*label).clone(),
                });
            }
        }
        if true_label == false_label {
            return Err(DslError::DuplicateLabel { label: true_label });
        }

        let var = Var::from_index(self.attributes.len());

        self.labels
            .insert(true_label.clone(), LabelRef { var, bit: true });
        self.labels
            .insert(false_label.clone(), LabelRef { var, bit: false });
        self.attributes.push(Attribute {
            category: category.into(),
            true_label,
            false_label,
        });

        Ok(var)
    }

    /// Number of attributes, which is also the number of variables.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes in variable order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    /// Attribute of a variable.
    pub fn attribute(&self, var: Var) -> Option<&Attribute> {
        self.attributes.get(var.index())
    }

    /// Look up a value label.
    pub fn resolve(&self, label: &str) -> Result<LabelRef, DslError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| DslError::UnknownLabel {
                label: label.to_owned(),
            })
    }

    /// The label asserted by a literal.
    pub fn label(&self, lit: Lit) -> Option<&str> {
        self.attribute(lit.var())
            .map(|attribute| attribute.label(lit.is_positive()))
    }
}

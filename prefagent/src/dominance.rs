//! Preference between objects and optimal objects.
//!
//! Penalty logic induces a total preorder by total penalty. Qualitative choice logic induces a
//! partial order: an object is preferred when its degree is at least as good for every rule and
//! strictly better for some rule. Objects better for some rules and worse for others are
//! incomparable.
use std::cmp::Ordering;

use crate::object::ObjectId;
use crate::penalty::PenaltyTable;
use crate::qualitative::{Degree, QualitativeTable};

/// Outcome of comparing two objects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// The first object is strictly preferred over the second.
    FirstPreferred,
    /// The second object is strictly preferred over the first.
    SecondPreferred,
    /// Neither is preferred, the scores agree.
    Equal,
    /// Neither is preferred, the scores disagree.
    Incomparable,
}

impl Comparison {
    /// The outcome with the roles of both objects swapped.
    pub fn reverse(self) -> Comparison {
        match self {
            Comparison::FirstPreferred => Comparison::SecondPreferred,
            Comparison::SecondPreferred => Comparison::FirstPreferred,
            other => other,
        }
    }
}

/// Compare two total penalties, lower is better.
pub fn compare_penalties(first: u64, second: u64) -> Comparison {
    match first.cmp(&second) {
        Ordering::Less => Comparison::FirstPreferred,
        Ordering::Greater => Comparison::SecondPreferred,
        Ordering::Equal => Comparison::Equal,
    }
}

/// Compare two degree vectors of the same rules, lower degrees are better.
pub fn compare_degrees(first: &[Degree], second: &[Degree]) -> Comparison {
    debug_assert_eq!(first.len(), second.len());

    let mut first_better = false;
    let mut second_better = false;

    for (a, b) in first.iter().zip(second.iter()) {
        match a.cmp(b) {
            Ordering::Less => first_better = true,
            Ordering::Greater => second_better = true,
            Ordering::Equal => (),
        }
    }

    match (first_better, second_better) {
        (true, false) => Comparison::FirstPreferred,
        (false, true) => Comparison::SecondPreferred,
        (false, false) => Comparison::Equal,
        (true, true) => Comparison::Incomparable,
    }
}

/// Objects with minimal total penalty, in table order.
pub fn penalty_optimal(table: &PenaltyTable) -> Vec<ObjectId> {
    let best = match table.rows.iter().map(|row| row.total).min() {
        Some(best) => best,
        None => return vec![],
    };
    table
        .rows
        .iter()
        .filter(|row| row.total == best)
        .map(|row| row.object)
        .collect()
}

/// Objects not strictly dominated by any other object, in table order.
pub fn qualitative_optimal(table: &QualitativeTable) -> Vec<ObjectId> {
    table
        .rows
        .iter()
        .filter(|candidate| {
            !table.rows.iter().any(|other| {
                compare_degrees(&other.degrees, &candidate.degrees) == Comparison::FirstPreferred
            })
        })
        .map(|row| row.object)
        .collect()
}

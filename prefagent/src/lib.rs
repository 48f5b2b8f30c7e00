//! PrefAgent evaluates preferences over the objects of a small boolean attribute space.
//!
//! A problem consists of binary attributes, hard constraints and two preference theories written
//! in the formula language of [`prefagent_dsl`]:
//!
//! * penalty logic, where each violated rule charges a penalty and objects with lower total
//!   penalty are preferred, and
//! * qualitative choice logic, where each rule ranks alternatives and objects satisfying better
//!   ranked alternatives are preferred, without trading one rule off against another.
//!
//! Constructing a [`PreferenceProblem`](problem::PreferenceProblem) enumerates every object,
//! determines the feasible ones with a single model enumeration of the hard constraints and scores
//! all feasible objects under both theories. All satisfiability questions go through a
//! [`SatOracle`](oracle::SatOracle), by default backed by varisat.

pub mod config;
pub mod dominance;
pub mod feasibility;
pub mod load;
pub mod object;
pub mod oracle;
pub mod penalty;
pub mod problem;
pub mod qualitative;
pub mod rules;


pub use config::{ProblemConfig, ProblemConfigUpdate};
pub use dominance::Comparison;
pub use load::{load_problem, ProblemInput};
pub use object::{Object, ObjectId};
pub use oracle::{OracleError, SatOracle, VarisatOracle};
pub use problem::{Exemplification, PreferenceProblem, ProblemError};
pub use qualitative::Degree;

pub use prefagent_dsl as dsl;

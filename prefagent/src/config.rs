//! Problem configuration.
use serde::Deserialize;

/// Configurable parameters used while constructing and querying a problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemConfig {
    /// Largest number of attributes accepted. The object space has 2^n elements. Values above
    /// [`MAX_ATTRIBUTES`](crate::problem::MAX_ATTRIBUTES) are clamped. (Default: 16)
    pub max_attributes: usize,

    /// Seed for sampling objects to compare. Sampling is seeded from entropy when absent.
    /// (Default: none)
    pub seed: Option<u64>,
}

impl Default for ProblemConfig {
    fn default() -> ProblemConfig {
        ProblemConfig {
            max_attributes: 16,
            seed: None,
        }
    }
}

impl ProblemConfig {
    /// Apply all options present in an update.
    pub fn apply(&mut self, update: &ProblemConfigUpdate) {
        if let Some(max_attributes) = update.max_attributes {
            self.max_attributes = max_attributes;
        }
        if let Some(seed) = update.seed {
            self.seed = Some(seed);
        }
    }

    /// Description of all options and their defaults.
    pub fn help() -> &'static str {
        concat!(
            "max_attributes: Largest number of attributes accepted. ",
            "The object space has 2^n elements, at most 2^63 on 64-bit targets. (Default: 16)\n",
            "seed: Seed for sampling objects to compare. ",
            "Sampling is seeded from entropy when absent. (Default: none)\n",
        )
    }
}

/// A partial [`ProblemConfig`], usually read from TOML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemConfigUpdate {
    pub max_attributes: Option<usize>,
    pub seed: Option<u64>,
}

impl ProblemConfigUpdate {
    /// Create an update that changes nothing.
    pub fn new() -> ProblemConfigUpdate {
        ProblemConfigUpdate::default()
    }

    /// Merge another update into this one, options of `other` take precedence.
    pub fn merge(&mut self, other: ProblemConfigUpdate) {
        if other.max_attributes.is_some() {
            self.max_attributes = other.max_attributes;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
    }
}

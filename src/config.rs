//! Run configuration
//!
//! Plain values handed to the pipeline. Loaded from YAML or built in code;
//! the CLI layers its flags on top.

use crate::error::{RankError, RankResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use webrank_algorithms::{
    IndexOrder, PageRankConfig, DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TELEPORTATION_RATE,
};

/// Default comment marker for edge-list input
pub const DEFAULT_COMMENT: char = '#';

/// Ranking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    /// Probability of a uniform random jump (damping)
    pub teleportation_rate: f64,
    /// Convergence threshold on the L1 distance between iterates
    pub epsilon: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Order in which node identifiers receive their index
    pub index_order: IndexOrder,
    /// Lines starting with this character are skipped
    pub comment: char,
    /// Reject out-of-range rate and non-positive epsilon instead of running
    pub strict: bool,
    /// Row-parallel matrix-vector product
    pub parallel: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            teleportation_rate: DEFAULT_TELEPORTATION_RATE,
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            index_order: IndexOrder::default(),
            comment: DEFAULT_COMMENT,
            strict: false,
            parallel: false,
        }
    }
}

impl RankConfig {
    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> RankResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> RankResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RankError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Check numeric settings. Only enforced in strict mode; otherwise the
    /// solver runs with whatever it is given.
    pub fn validate(&self) -> RankResult<()> {
        if !self.strict {
            return Ok(());
        }
        if !self.teleportation_rate.is_finite() || !(0.0..=1.0).contains(&self.teleportation_rate) {
            return Err(RankError::InvalidConfig(format!(
                "teleportation_rate must be in [0, 1], got {}",
                self.teleportation_rate
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(RankError::InvalidConfig(format!(
                "epsilon must be finite and > 0, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Solver parameters
    pub fn solver_config(&self) -> PageRankConfig {
        PageRankConfig {
            teleportation_rate: self.teleportation_rate,
            epsilon: self.epsilon,
            max_iterations: self.max_iterations,
            parallel: self.parallel,
        }
    }
}

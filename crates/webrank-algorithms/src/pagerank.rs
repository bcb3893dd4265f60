//! PageRank algorithm implementation
//!
//! Power iteration over a sparse [`TransitionMatrix`]. One step computes
//! `raw = (1 - d)·M·v`, then spreads the mass missing from `raw` uniformly
//! over all pages. That single correction covers both the teleportation jump
//! and the mass parked on dangling nodes, and keeps every iterate a
//! probability distribution.

use super::error::{AlgoError, AlgoResult};
use super::transition::TransitionMatrix;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default teleportation rate
pub const DEFAULT_TELEPORTATION_RATE: f64 = 0.2;
/// Default convergence threshold on the L1 distance between iterates
pub const DEFAULT_EPSILON: f64 = 1e-4;
/// Default iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// PageRank configuration
///
/// Values are taken as given: a rate outside `[0, 1]` or a non-positive
/// epsilon produce degenerate but well-defined runs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageRankConfig {
    /// Probability of a uniform random jump instead of following a link
    pub teleportation_rate: f64,
    /// Iteration stops once successive vectors are closer than this (L1)
    pub epsilon: f64,
    /// Hard cap on the number of iterations
    pub max_iterations: usize,
    /// Spread the matrix-vector product over the rayon pool
    pub parallel: bool,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            teleportation_rate: DEFAULT_TELEPORTATION_RATE,
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            parallel: false,
        }
    }
}

/// Lifecycle of a solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolverState {
    /// Uniform start vector, no step taken yet
    Initialized,
    /// At least one step taken, not yet stable
    Iterating,
    /// Successive iterates closer than epsilon
    Converged,
    /// Iteration cap reached without convergence; the last iterate stands
    Exhausted,
}

impl SolverState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SolverState::Converged | SolverState::Exhausted)
    }
}

/// Result of a solver run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageRankRun {
    /// Rank per node index
    pub scores: Vec<f64>,
    /// Number of steps performed
    pub iterations: usize,
    /// Last measured L1 distance between iterates (none before the second step)
    pub diff_l1: Option<f64>,
    /// Terminal state: `Converged` or `Exhausted`
    pub state: SolverState,
}

impl PageRankRun {
    pub fn converged(&self) -> bool {
        self.state == SolverState::Converged
    }
}

/// Power-iteration solver bound to one transition matrix.
pub struct PageRankSolver<'a> {
    matrix: &'a TransitionMatrix,
    config: PageRankConfig,
    state: SolverState,
    scores: Vec<f64>,
    scratch: Vec<f64>,
    iterations: usize,
    last_diff: Option<f64>,
}

impl<'a> PageRankSolver<'a> {
    /// Start from the uniform vector `1/N`. Fails on an empty graph.
    pub fn new(matrix: &'a TransitionMatrix, config: PageRankConfig) -> AlgoResult<Self> {
        let n = matrix.node_count();
        if n == 0 {
            return Err(AlgoError::EmptyGraph);
        }

        Ok(Self {
            matrix,
            config,
            state: SolverState::Initialized,
            scores: vec![1.0 / n as f64; n],
            scratch: vec![0.0; n],
            iterations: 0,
            last_diff: None,
        })
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Current iterate
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn last_diff(&self) -> Option<f64> {
        self.last_diff
    }

    /// Apply one power-iteration step to `v`, leaving solver state untouched.
    ///
    /// `v` must hold one entry per node.
    pub fn step(&self, v: &[f64]) -> AlgoResult<Vec<f64>> {
        let n = self.matrix.node_count();
        if v.len() != n {
            return Err(AlgoError::DimensionMismatch {
                expected: n,
                actual: v.len(),
            });
        }
        let mut out = vec![0.0; n];
        power_step(self.matrix, &self.config, v, &mut out);
        Ok(out)
    }

    /// Perform one state transition and return the new state.
    ///
    /// The distance check starts with the second step: the first step has no
    /// previous iterate to compare against.
    pub fn advance(&mut self) -> SolverState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.iterations >= self.config.max_iterations {
            self.state = SolverState::Exhausted;
            return self.state;
        }

        power_step(self.matrix, &self.config, &self.scores, &mut self.scratch);
        self.iterations += 1;
        self.state = SolverState::Iterating;

        let has_previous = self.iterations > 1;
        let diff = if has_previous {
            Some(l1_distance(&self.scores, &self.scratch))
        } else {
            None
        };
        std::mem::swap(&mut self.scores, &mut self.scratch);

        if let Some(diff) = diff {
            self.last_diff = Some(diff);
            debug!("Iteration {}: sum of absolute differences {}", self.iterations, diff);
            if diff < self.config.epsilon {
                self.state = SolverState::Converged;
                return self.state;
            }
        }

        if self.iterations >= self.config.max_iterations {
            self.state = SolverState::Exhausted;
        }
        self.state
    }

    /// Iterate to a terminal state.
    pub fn run(mut self) -> PageRankRun {
        while !self.advance().is_terminal() {}

        match self.state {
            SolverState::Converged => info!(
                "PageRank converged after {} iterations over {} pages",
                self.iterations,
                self.scores.len()
            ),
            _ => warn!(
                "PageRank stopped at the iteration cap ({}) without converging (last diff {:?})",
                self.iterations, self.last_diff
            ),
        }

        PageRankRun {
            scores: self.scores,
            iterations: self.iterations,
            diff_l1: self.last_diff,
            state: self.state,
        }
    }
}

/// Calculate PageRank over a transition matrix
pub fn page_rank(matrix: &TransitionMatrix, config: PageRankConfig) -> AlgoResult<PageRankRun> {
    Ok(PageRankSolver::new(matrix, config)?.run())
}

fn power_step(matrix: &TransitionMatrix, config: &PageRankConfig, v: &[f64], out: &mut [f64]) {
    if config.parallel {
        matrix.multiply_parallel(v, out);
    } else {
        matrix.multiply(v, out);
    }

    let follow = 1.0 - config.teleportation_rate;
    for rank in out.iter_mut() {
        *rank *= follow;
    }

    // Teleportation and dangling mass both show up as this deficit
    let deficit = 1.0 - out.iter().sum::<f64>();
    let share = deficit / out.len() as f64;
    for rank in out.iter_mut() {
        *rank += share;
    }
}

fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

//! Sparse power-iteration PageRank
//!
//! Three stages, each consuming the previous stage's immutable output:
//! - [`IndexedGraph`] maps node identifiers to dense indices,
//! - [`TransitionMatrix`] turns the indexed edges into transition probabilities,
//! - [`PageRankSolver`] iterates the rank vector to convergence or the cap.

pub mod common;
pub mod error;
pub mod pagerank;
pub mod transition;

pub use common::{Edge, IndexOrder, IndexedGraph, NodeIndex};
pub use error::{AlgoError, AlgoResult};
pub use pagerank::{
    page_rank, PageRankConfig, PageRankRun, PageRankSolver, SolverState,
    DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS, DEFAULT_TELEPORTATION_RATE,
};
pub use transition::{TransitionEntry, TransitionMatrix};

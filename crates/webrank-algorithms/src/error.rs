//! Error types for the ranking algorithms

use thiserror::Error;

/// Errors raised while building the transition matrix or solving
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    /// The graph has no nodes, so no uniform start vector exists
    #[error("Graph is empty: at least one node is required")]
    EmptyGraph,

    /// An edge refers to an index outside [0, node_count)
    #[error("Edge index {index} out of range for {node_count} node(s)")]
    IndexOutOfRange { index: usize, node_count: usize },

    /// A rank vector whose length differs from the matrix dimension
    #[error("Vector of length {actual} does not match {expected} node(s)")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type AlgoResult<T> = Result<T, AlgoError>;

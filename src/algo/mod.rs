//! Graph algorithms module
//!
//! Algorithms live in the `webrank-algorithms` crate.
//! This module provides the integration/adapter layer between the
//! edge-list reader and the index-space algorithms.

use crate::error::RankResult;
use crate::io::RawEdge;
use tracing::{debug, info};

// Re-export algorithms
pub use webrank_algorithms::{
    page_rank, Edge, IndexOrder, IndexedGraph, NodeIndex, PageRankConfig, PageRankRun,
    PageRankSolver, SolverState, TransitionEntry, TransitionMatrix,
};

/// Build the indexed graph from a stream of edge records.
///
/// The first malformed record or read error aborts the load.
pub fn load_graph<I>(records: I, order: IndexOrder) -> RankResult<IndexedGraph<String>>
where
    I: IntoIterator<Item = RankResult<RawEdge>>,
{
    let mut pairs = Vec::new();
    for record in records {
        let edge = record?;
        pairs.push((edge.source, edge.target));
    }

    let graph = IndexedGraph::from_pairs(pairs, order);
    info!(
        "Loaded {} edges over {} nodes",
        graph.edge_count(),
        graph.node_count()
    );
    Ok(graph)
}

/// Build the transition matrix of an indexed graph.
pub fn build_matrix<T>(graph: &IndexedGraph<T>) -> RankResult<TransitionMatrix> {
    let matrix = TransitionMatrix::from_edges(graph.edges(), graph.node_count())?;
    debug!(
        "Transition matrix built: {} entries, {} dangling nodes",
        matrix.entry_count(),
        matrix.dangling_nodes().count()
    );
    Ok(matrix)
}

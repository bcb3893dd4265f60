//! Shared graph types for the ranking pipeline
//!
//! Maps opaque node identifiers onto a dense index space (0..N) so the
//! transition matrix and the solver can work on plain arrays.

use rustc_hash::FxHashMap;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense node index in `0..node_count`
pub type NodeIndex = usize;

/// A directed edge in index space. Parallel edges and self-loops are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
}

impl Edge {
    pub fn new(source: NodeIndex, target: NodeIndex) -> Self {
        Self { source, target }
    }
}

/// Order in which identifiers receive their dense index.
///
/// Rank values do not depend on the order, only the order of the output does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum IndexOrder {
    /// Every source in stream order, then every destination in stream order
    #[default]
    SourcesFirst,
    /// One pass over the stream: each record's source, then its destination
    FirstSeen,
}

/// A dense, integer-indexed edge list with its identifier lookup tables.
///
/// `index_to_node` and `node_to_index` form a bijection for the lifetime of
/// the graph; neither is mutated after construction.
#[derive(Debug, Clone)]
pub struct IndexedGraph<T> {
    /// Mapping from dense index (0..N) back to the original identifier
    index_to_node: Vec<T>,
    /// Mapping from original identifier to dense index
    node_to_index: FxHashMap<T, NodeIndex>,
    /// Edges in stream order, translated to index space
    edges: Vec<Edge>,
}

impl<T: Eq + Hash + Clone> IndexedGraph<T> {
    /// Index a sequence of `(source, destination)` identifier pairs.
    pub fn from_pairs<I>(pairs: I, order: IndexOrder) -> Self
    where
        I: IntoIterator<Item = (T, T)>,
    {
        let pairs: Vec<(T, T)> = pairs.into_iter().collect();
        let mut interner = Interner::with_capacity(pairs.len());

        let edges = match order {
            IndexOrder::SourcesFirst => {
                let sources: Vec<NodeIndex> =
                    pairs.iter().map(|(src, _)| interner.intern(src)).collect();
                let targets: Vec<NodeIndex> =
                    pairs.iter().map(|(_, dst)| interner.intern(dst)).collect();
                sources
                    .into_iter()
                    .zip(targets)
                    .map(|(source, target)| Edge::new(source, target))
                    .collect()
            }
            IndexOrder::FirstSeen => pairs
                .iter()
                .map(|(src, dst)| {
                    let source = interner.intern(src);
                    let target = interner.intern(dst);
                    Edge::new(source, target)
                })
                .collect(),
        };

        Self {
            index_to_node: interner.index_to_node,
            node_to_index: interner.node_to_index,
            edges,
        }
    }

    /// Dense index of an identifier, if it appeared in the input
    pub fn index_of(&self, node: &T) -> Option<NodeIndex> {
        self.node_to_index.get(node).copied()
    }
}

impl<T> IndexedGraph<T> {
    /// Number of distinct nodes (N)
    pub fn node_count(&self) -> usize {
        self.index_to_node.len()
    }

    /// Number of edges, counting parallel edges separately
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Original identifier of a dense index
    pub fn node(&self, idx: NodeIndex) -> Option<&T> {
        self.index_to_node.get(idx)
    }

    /// All identifiers, indexed by their dense index
    pub fn nodes(&self) -> &[T] {
        &self.index_to_node
    }

    /// Edges in stream order, in index space
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

struct Interner<T> {
    index_to_node: Vec<T>,
    node_to_index: FxHashMap<T, NodeIndex>,
}

impl<T: Eq + Hash + Clone> Interner<T> {
    fn with_capacity(capacity: usize) -> Self {
        let mut node_to_index = FxHashMap::default();
        node_to_index.reserve(capacity);
        Self {
            index_to_node: Vec::with_capacity(capacity),
            node_to_index,
        }
    }

    fn intern(&mut self, node: &T) -> NodeIndex {
        if let Some(&idx) = self.node_to_index.get(node) {
            return idx;
        }
        let idx = self.index_to_node.len();
        self.index_to_node.push(node.clone());
        self.node_to_index.insert(node.clone(), idx);
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(s, d)| (s.to_string(), d.to_string()))
            .collect()
    }

    #[test]
    fn test_sources_are_indexed_before_destinations() {
        // c only ever appears as a destination, so it is indexed last
        let graph = IndexedGraph::from_pairs(
            pairs(&[("a", "c"), ("b", "a"), ("a", "b")]),
            IndexOrder::SourcesFirst,
        );

        assert_eq!(graph.index_to_node, vec!["a", "b", "c"]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(
            graph.edges,
            vec![Edge::new(0, 2), Edge::new(1, 0), Edge::new(0, 1)]
        );
    }

    #[test]
    fn test_first_seen_order_interleaves() {
        let graph = IndexedGraph::from_pairs(
            pairs(&[("a", "c"), ("b", "a"), ("a", "b")]),
            IndexOrder::FirstSeen,
        );

        assert_eq!(graph.index_to_node, vec!["a", "c", "b"]);
        assert_eq!(
            graph.edges,
            vec![Edge::new(0, 1), Edge::new(2, 0), Edge::new(0, 2)]
        );
    }

    #[test]
    fn test_mapping_is_a_bijection() {
        let graph = IndexedGraph::from_pairs(
            pairs(&[("x", "y"), ("y", "z"), ("z", "x"), ("w", "w")]),
            IndexOrder::SourcesFirst,
        );

        assert_eq!(graph.node_to_index.len(), graph.node_count());
        assert_eq!(graph.nodes().len(), graph.node_count());
        for (idx, node) in graph.nodes().iter().enumerate() {
            assert_eq!(graph.index_of(node), Some(idx));
            assert_eq!(graph.node(idx), Some(node));
        }
        assert_eq!(graph.index_of(&"missing".to_string()), None);
    }

    #[test]
    fn test_parallel_edges_and_self_loops_are_kept() {
        let graph = IndexedGraph::from_pairs(
            pairs(&[("a", "b"), ("a", "b"), ("b", "b")]),
            IndexOrder::SourcesFirst,
        );

        assert_eq!(graph.edge_count(), 3);
        let edges = graph.edges();
        assert_eq!(edges[0], edges[1]);
        assert_eq!(edges[2], Edge::new(1, 1));
    }

    #[test]
    fn test_empty_input() {
        let graph: IndexedGraph<u64> =
            IndexedGraph::from_pairs(Vec::new(), IndexOrder::SourcesFirst);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}

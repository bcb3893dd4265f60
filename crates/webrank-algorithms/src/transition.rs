//! Sparse transition matrix
//!
//! Each edge `src -> dst` contributes the entry `(dst, src, 1 / out_degree(src))`.
//! Entries are stored grouped by row (destination) in compressed sparse row form,
//! so `M·v` is an indexed accumulation over each row's entries. Nodes with no
//! out-edges contribute no entries at all; the solver accounts for their mass.

use super::common::{Edge, NodeIndex};
use super::error::{AlgoError, AlgoResult};
use rayon::prelude::*;

/// One non-zero of the transition matrix in triplet form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionEntry {
    /// Row: destination node
    pub row: NodeIndex,
    /// Column: source node
    pub col: NodeIndex,
    /// Transition probability `1 / out_degree(col)`
    pub weight: f64,
}

/// Column-stochastic (per non-dangling source) sparse matrix over N pages.
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    node_count: usize,
    out_degrees: Vec<usize>,
    /// Offsets into `cols`/`weights`. Size = node_count + 1
    row_offsets: Vec<usize>,
    cols: Vec<NodeIndex>,
    weights: Vec<f64>,
}

impl TransitionMatrix {
    /// Build the matrix for `node_count` pages from an edge list in index space.
    ///
    /// Within a row, entries keep the order of `edges`, which fixes the
    /// summation order of the product.
    pub fn from_edges(edges: &[Edge], node_count: usize) -> AlgoResult<Self> {
        let mut out_degrees = vec![0usize; node_count];
        let mut in_degrees = vec![0usize; node_count];

        for edge in edges {
            for index in [edge.source, edge.target] {
                if index >= node_count {
                    return Err(AlgoError::IndexOutOfRange { index, node_count });
                }
            }
            out_degrees[edge.source] += 1;
            in_degrees[edge.target] += 1;
        }

        let mut row_offsets = Vec::with_capacity(node_count + 1);
        row_offsets.push(0);
        for degree in &in_degrees {
            let last = row_offsets[row_offsets.len() - 1];
            row_offsets.push(last + degree);
        }

        let mut cursor = row_offsets[..node_count].to_vec();
        let mut cols = vec![0; edges.len()];
        let mut weights = vec![0.0; edges.len()];

        for edge in edges {
            let slot = cursor[edge.target];
            cols[slot] = edge.source;
            weights[slot] = 1.0 / out_degrees[edge.source] as f64;
            cursor[edge.target] += 1;
        }

        Ok(Self {
            node_count,
            out_degrees,
            row_offsets,
            cols,
            weights,
        })
    }

    /// Number of pages (N)
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of stored non-zeros (one per edge)
    pub fn entry_count(&self) -> usize {
        self.cols.len()
    }

    /// Out-degree of a node, counting parallel edges and self-loops
    ///
    /// # Panics
    ///
    /// Panics if `idx >= node_count()`.
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.out_degrees[idx]
    }

    /// Nodes with no out-edges
    pub fn dangling_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.out_degrees
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(idx, _)| idx)
    }

    /// `(col, weight)` pairs of one row, in edge-stream order
    ///
    /// # Panics
    ///
    /// Panics if `row >= node_count()`.
    pub fn row(&self, row: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        let start = self.row_offsets[row];
        let end = self.row_offsets[row + 1];
        self.cols[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }

    /// All entries in triplet form, grouped by row
    pub fn entries(&self) -> impl Iterator<Item = TransitionEntry> + '_ {
        (0..self.node_count).flat_map(move |row| {
            self.row(row)
                .map(move |(col, weight)| TransitionEntry { row, col, weight })
        })
    }

    fn row_dot(&self, row: NodeIndex, v: &[f64]) -> f64 {
        self.row(row).fold(0.0, |acc, (col, weight)| acc + weight * v[col])
    }

    /// Sparse product `out = M·v`
    pub fn multiply(&self, v: &[f64], out: &mut [f64]) {
        debug_assert_eq!(v.len(), self.node_count);
        debug_assert_eq!(out.len(), self.node_count);

        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.row_dot(row, v);
        }
    }

    /// Same product as [`multiply`](Self::multiply) with rows spread over the rayon
    /// pool. Each row is reduced in the same order, so the result is bit-identical.
    pub fn multiply_parallel(&self, v: &[f64], out: &mut [f64]) {
        debug_assert_eq!(v.len(), self.node_count);
        debug_assert_eq!(out.len(), self.node_count);

        out.par_iter_mut()
            .enumerate()
            .for_each(|(row, slot)| *slot = self.row_dot(row, v));
    }
}

//! Load → build → solve pipeline
//!
//! Runs to completion before any output is produced, so a failing run never
//! leaves partial results behind.

use crate::algo::{self, IndexedGraph, PageRankRun, SolverState};
use crate::config::RankConfig;
use crate::error::{RankError, RankResult};
use crate::io::{write_ranks, EdgeListReader, RankFormat, RawEdge};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::info;

/// Final ranks paired with the identifier lookup
#[derive(Debug, Clone)]
pub struct RankedGraph {
    pub graph: IndexedGraph<String>,
    pub run: PageRankRun,
}

impl RankedGraph {
    /// `(identifier, rank)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.graph
            .nodes()
            .iter()
            .map(String::as_str)
            .zip(self.run.scores.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.run.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.run.scores.is_empty()
    }

    /// Rank of an original identifier
    pub fn rank_of(&self, node: &str) -> Option<f64> {
        self.graph
            .index_of(&node.to_string())
            .map(|idx| self.run.scores[idx])
    }

    pub fn converged(&self) -> bool {
        self.run.state == SolverState::Converged
    }

    /// Write all ranks in index order.
    pub fn write<W: Write>(&self, writer: W, format: RankFormat) -> RankResult<()> {
        write_ranks(writer, self.iter(), format)
    }
}

/// Ranking pipeline bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct RankPipeline {
    config: RankConfig,
}

impl RankPipeline {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Rank an already-parsed record stream.
    pub fn rank_records<I>(&self, records: I) -> RankResult<RankedGraph>
    where
        I: IntoIterator<Item = RankResult<RawEdge>>,
    {
        self.config.validate()?;

        let graph = algo::load_graph(records, self.config.index_order)?;
        if graph.node_count() == 0 {
            return Err(RankError::EmptyGraph);
        }
        let matrix = algo::build_matrix(&graph)?;
        let run = algo::page_rank(&matrix, self.config.solver_config())?;

        info!(
            "Ranked {} pages in {} iterations ({:?})",
            run.scores.len(),
            run.iterations,
            run.state
        );
        Ok(RankedGraph { graph, run })
    }

    /// Rank a tab-separated edge list from a buffered stream.
    pub fn rank_reader<R: BufRead>(&self, reader: R) -> RankResult<RankedGraph> {
        self.rank_records(EdgeListReader::with_comment(reader, self.config.comment))
    }

    /// Rank a tab-separated edge-list file.
    pub fn rank_file(&self, path: impl AsRef<Path>) -> RankResult<RankedGraph> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RankError::File {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Reading edge list from {}", path.display());
        self.rank_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_rank_reader() {
        let pipeline = RankPipeline::default();
        let ranked = pipeline
            .rank_reader(Cursor::new("1\t2\n2\t1\n1\t3\n"))
            .unwrap();

        assert_eq!(ranked.len(), 3);
        assert!(ranked.converged());
        let order: Vec<&str> = ranked.iter().map(|(node, _)| node).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
        assert!(ranked.rank_of("1").unwrap() > ranked.rank_of("3").unwrap());
        assert_eq!(ranked.rank_of("missing"), None);
    }

    #[test]
    fn test_empty_input_fails_fast() {
        let err = RankPipeline::default()
            .rank_reader(Cursor::new("# only a header\n"))
            .unwrap_err();
        assert!(matches!(err, RankError::EmptyGraph));
    }

    #[test]
    fn test_strict_mode_rejects_before_reading() {
        let pipeline = RankPipeline::new(RankConfig {
            epsilon: -1.0,
            strict: true,
            ..RankConfig::default()
        });
        let err = pipeline.rank_reader(Cursor::new("a\tb\n")).unwrap_err();
        assert!(matches!(err, RankError::InvalidConfig(_)));
    }

    #[test]
    fn test_write_tsv() {
        let ranked = RankPipeline::default()
            .rank_reader(Cursor::new("a\tb\nb\ta\n"))
            .unwrap();
        let mut out = Vec::new();
        ranked.write(&mut out, RankFormat::Tsv).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\t0.5\nb\t0.5\n");
    }
}

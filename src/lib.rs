//! Webrank
//!
//! PageRank centrality for directed graphs given as tab-separated edge lists.
//!
//! # Architecture
//!
//! - `io`: edge-list reader and rank writer (the boundary, original identifiers)
//! - `algo`: adapter onto `webrank-algorithms` (dense indices, transition
//!   matrix, power-iteration solver)
//! - `pipeline`: load → build → solve, producing ranks in index order
//!
//! ## Example Usage
//!
//! ```rust
//! use webrank::{RankConfig, RankFormat, RankPipeline};
//! use std::io::Cursor;
//!
//! let edges = "# from\tto\na\tb\nb\tc\nc\ta\na\tc\n";
//! let ranked = RankPipeline::new(RankConfig::default())
//!     .rank_reader(Cursor::new(edges))
//!     .unwrap();
//!
//! let total: f64 = ranked.iter().map(|(_, rank)| rank).sum();
//! assert!((total - 1.0).abs() < 1e-9);
//!
//! let mut out = Vec::new();
//! ranked.write(&mut out, RankFormat::Tsv).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;

// Re-export main types for convenience
pub use config::RankConfig;
pub use error::{RankError, RankResult};
pub use io::{EdgeListReader, RankFormat, RawEdge};
pub use pipeline::{RankPipeline, RankedGraph};

pub use webrank_algorithms::{IndexOrder, PageRankConfig, PageRankRun, SolverState};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

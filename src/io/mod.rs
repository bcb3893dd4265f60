//! Edge-list input and rank output

pub mod reader;
pub mod writer;

pub use reader::{parse_record, EdgeListReader, RawEdge};
pub use writer::{format_rank, write_ranks, RankFormat};

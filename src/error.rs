//! Error types for the ranking pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use webrank_algorithms::AlgoError;

/// Errors that abort a ranking run
#[derive(Error, Debug)]
pub enum RankError {
    /// A record could not be decomposed into source and destination
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// No edges were read, so there is nothing to rank
    #[error("Graph is empty: the input contains no edges")]
    EmptyGraph,

    /// Configuration rejected by strict validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while reading or writing a stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O error tied to a file
    #[error("I/O error on {path}: {source}")]
    File { path: PathBuf, source: io::Error },

    /// YAML configuration could not be parsed
    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON output could not be produced
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Matrix construction failed
    #[error("Algorithm error: {0}")]
    Algorithm(AlgoError),
}

impl From<AlgoError> for RankError {
    fn from(e: AlgoError) -> Self {
        match e {
            AlgoError::EmptyGraph => RankError::EmptyGraph,
            other => RankError::Algorithm(other),
        }
    }
}

pub type RankResult<T> = Result<T, RankError>;

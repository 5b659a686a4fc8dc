//! Error types for RECAP

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for RECAP operations
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Directory does not exist: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("File does not exist: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Not enough background files: requested {requested} replicates, found {found} matching '{pattern}'")]
    InsufficientReplicates {
        requested: usize,
        found: usize,
        pattern: String,
    },

    #[error("{}:{line}: p-value column {column} out of range (row has {width} fields)", path.display())]
    ColumnOutOfRange {
        path: PathBuf,
        line: usize,
        column: usize,
        width: usize,
    },

    #[error("{}:{line}: invalid p-value '{value}'", path.display())]
    InvalidPValue {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("Empty null distribution: {reason}")]
    EmptyNullDistribution { reason: String },

    #[error("LFDR histogram undefined: {reason}")]
    UndefinedHistogram { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for RECAP operations
pub type Result<T> = std::result::Result<T, RecapError>;

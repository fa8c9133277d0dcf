//! Error types for the co-conservation engine

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading, filtering or writing a co-conservation run
#[derive(Error, Debug)]
pub enum CoConservationError {
    /// A row of an edge list could not be parsed
    #[error("{}:{line}: {reason}", .path.display())]
    InputFormat {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// A node id did not follow the expected `<array>_#<ordinal>` form
    #[error("Invalid protein id '{0}': expected <array-context>_#<ordinal>")]
    InvalidProteinId(String),

    /// An input file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A run parameter is out of its accepted domain
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A chunk task panicked or otherwise failed
    #[error("Worker failed on chunk {chunk}: {reason}")]
    WorkerFailure { chunk: usize, reason: String },

    /// The worker pool could not be started
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A chunk ran past its time limit
    #[error("Chunk {chunk} exceeded its time limit of {limit:?}")]
    ChunkTimeout { chunk: usize, limit: Duration },

    /// An output artifact could not be created or written
    #[error("Failed to write {}: {source}", .path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoConservationError>;

//! Configuration management for the co-conservation filter

use crate::error::{CoConservationError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of array/protein cluster pairs evaluated per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 200_000;

/// Which edges of the protein graph survive the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EdgePolicy {
    /// Keep every edge with at least one retained endpoint. The far endpoint
    /// is pulled into the filtered graph even if it was not retained.
    #[default]
    TouchingRetained,

    /// Keep only edges whose endpoints are both retained
    BothRetained,
}

impl std::fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgePolicy::TouchingRetained => f.write_str("touching-retained"),
            EdgePolicy::BothRetained => f.write_str("both-retained"),
        }
    }
}

/// Parameters of one co-conservation run
#[derive(Debug, Clone)]
pub struct Config {
    /// Array-similarity edge list (TSV)
    pub array_edges: PathBuf,

    /// Protein-similarity edge list (TSV)
    pub protein_edges: PathBuf,

    /// Output directory for versioned artifacts
    pub output_dir: PathBuf,

    /// Minimum coverage for an array/protein cluster pair to be co-conserved
    pub coverage: f64,

    /// Components with fewer nodes are discarded
    pub mininode: usize,

    /// Pairs per scheduler chunk
    pub chunk_size: usize,

    /// Worker threads (0 = all available cores)
    pub workers: usize,

    /// Per-chunk time limit
    pub chunk_timeout: Option<Duration>,

    pub edge_policy: EdgePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            array_edges: PathBuf::new(),
            protein_edges: PathBuf::new(),
            output_dir: PathBuf::from("output"),
            coverage: 0.3,
            mininode: 5,
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: 0,
            chunk_timeout: None,
            edge_policy: EdgePolicy::TouchingRetained,
        }
    }
}

impl Config {
    /// Create a configuration for the given inputs with default parameters
    pub fn new(
        array_edges: impl Into<PathBuf>,
        protein_edges: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            array_edges: array_edges.into(),
            protein_edges: protein_edges.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Clamp coverage into [0, 1] and reject values that cannot be used
    pub fn validate(mut self) -> Result<Self> {
        if self.coverage.is_nan() {
            return Err(CoConservationError::InvalidConfig(
                "coverage must be a number".to_string(),
            ));
        }
        self.coverage = clamp_coverage(self.coverage);

        if self.chunk_size == 0 {
            return Err(CoConservationError::InvalidConfig(
                "chunk size must be positive".to_string(),
            ));
        }
        if self.chunk_timeout == Some(Duration::ZERO) {
            return Err(CoConservationError::InvalidConfig(
                "chunk timeout must be positive".to_string(),
            ));
        }

        Ok(self)
    }

    /// Worker count with 0 resolved to the number of available cores
    pub fn resolved_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            num_cpus::get()
        }
    }
}

/// Clamp a coverage threshold into [0, 1]
pub fn clamp_coverage(coverage: f64) -> f64 {
    coverage.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_is_clamped() {
        let mut config = Config::new("a.tsv", "p.tsv", "out");
        config.coverage = 1.7;
        assert_eq!(config.clone().validate().unwrap().coverage, 1.0);

        config.coverage = -0.2;
        assert_eq!(config.validate().unwrap().coverage, 0.0);
    }

    #[test]
    fn rejects_nan_coverage_and_empty_chunks() {
        let mut config = Config::new("a.tsv", "p.tsv", "out");
        config.coverage = f64::NAN;
        assert!(config.clone().validate().is_err());

        config.coverage = 0.5;
        config.chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_workers_means_all_cores() {
        let config = Config::default();
        assert!(config.resolved_workers() >= 1);
    }
}

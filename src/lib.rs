//! Core library functions for array/protein co-conservation filtering

pub mod cluster;
pub mod coconservation;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod ids;
pub mod pipeline;
pub mod storage;

pub use config::{Config, EdgePolicy};
pub use error::{CoConservationError, Result};
pub use ids::{ArrayId, ProteinId};
pub use pipeline::{filter_edge_lists, run, CoConservation, RunReport};

//! Cluster analysis module

pub mod detection;
pub mod metrics;

use serde::{Deserialize, Serialize};

/// Represents a cluster (connected component) in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Position of this cluster in size order
    pub id: u32,

    /// Members of this cluster (node indices, ascending)
    pub members: Vec<u32>,

    /// Size of the cluster
    pub size: usize,

    /// Density: actual edges / potential edges
    pub density: f32,
}

//! Memory-efficient undirected graph representation

use serde::{Deserialize, Serialize};
use std::mem;

/// Compressed sparse representation of an undirected graph.
///
/// Every edge is stored in the adjacency lists of both endpoints, each list
/// sorted and free of duplicates and self-loops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's neighbours begin
    /// offsets[i] to offsets[i+1] defines the neighbour range for node i
    pub offsets: Vec<u32>,

    /// Neighbour array: concatenated adjacency lists
    pub edges: Vec<u32>,

    /// Mapping from internal node indices to original string ids
    pub node_ids: Vec<String>,
}

impl CompressedGraph {
    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count: 0,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count * 2),
            node_ids: Vec::with_capacity(node_count),
        }
    }

    /// Get the neighbours of a node
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// String id of a node
    pub fn node_id(&self, node: usize) -> &str {
        &self.node_ids[node]
    }

    /// Iterate over each undirected edge once, as `(lower, higher)` indices
    pub fn undirected_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.node_count).flat_map(move |src| {
            self.neighbors(src)
                .iter()
                .filter(move |&&dst| (src as u32) < dst)
                .map(move |&dst| (src as u32, dst))
        })
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();
        let ids = self.node_ids.iter().map(|s| s.capacity()).sum::<usize>();

        base + offsets + edges + ids
    }
}

//! Cluster statistics and metrics

use crate::cluster::Cluster;
use crate::graph::CompressedGraph;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashSet;

/// Calculate density (actual edges / potential edges) of an undirected cluster
pub fn calculate_density(graph: &CompressedGraph, members: &[u32]) -> f32 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential_edges = n * (n - 1) / 2;
    let member_set: HashSet<u32> = members.iter().copied().collect();

    // Each internal edge is seen from both endpoints
    let endpoint_hits: usize = members
        .iter()
        .map(|&src| {
            graph
                .neighbors(src as usize)
                .iter()
                .filter(|dst| member_set.contains(dst))
                .count()
        })
        .sum();

    (endpoint_hits / 2) as f32 / potential_edges as f32
}

/// Size distribution of a cluster set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterSizeStats {
    pub cluster_count: usize,
    pub total_nodes: usize,
    pub largest: usize,
    pub smallest: usize,
    pub mean_size: f64,
    pub mean_density: f64,
}

impl ClusterSizeStats {
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        if clusters.is_empty() {
            return Self::default();
        }

        let total_nodes: usize = clusters.iter().map(|c| c.size).sum();
        let count = clusters.len() as f64;
        let (smallest, largest) = clusters
            .iter()
            .map(|c| c.size)
            .minmax()
            .into_option()
            .unwrap_or((0, 0));

        Self {
            cluster_count: clusters.len(),
            total_nodes,
            largest,
            smallest,
            mean_size: total_nodes as f64 / count,
            mean_density: clusters.iter().map(|c| c.density as f64).sum::<f64>() / count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::detection::find_connected_components;
    use crate::graph::builder::GraphBuilder;

    #[test]
    fn triangle_is_fully_dense_and_path_is_not() {
        let mut builder = GraphBuilder::with_capacity(6);
        builder.add_edge("a", "b");
        builder.add_edge("b", "c");
        builder.add_edge("c", "a");
        builder.add_edge("x", "y");
        builder.add_edge("y", "z");
        let graph = builder.build();

        let clusters = find_connected_components(&graph, 1);
        let densities: Vec<f32> = clusters.iter().map(|c| c.density).collect();
        assert_eq!(densities.len(), 2);
        assert!(densities.contains(&1.0));
        assert!(densities.iter().any(|&d| (d - 2.0 / 3.0).abs() < 1e-6));

        let stats = ClusterSizeStats::from_clusters(&clusters);
        assert_eq!(stats.cluster_count, 2);
        assert_eq!(stats.total_nodes, 6);
        assert_eq!(stats.largest, 3);
        assert_eq!(stats.smallest, 3);
    }

    #[test]
    fn empty_cluster_set_has_zero_stats() {
        assert_eq!(ClusterSizeStats::from_clusters(&[]), ClusterSizeStats::default());
    }
}

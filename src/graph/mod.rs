//! Graph representation and algorithms module

pub mod algorithms;
pub mod builder;
pub mod compressed;

pub use compressed::CompressedGraph;

use crate::data::EdgeList;
use algorithms::PruneStats;

/// Build the cluster graph for an edge list: self-loops removed, components
/// smaller than `mininode` discarded
pub fn build_cluster_graph(edge_list: &EdgeList, mininode: usize) -> (CompressedGraph, PruneStats) {
    log::info!("Building {} network from {}", edge_list.kind, edge_list.path.display());

    let graph = builder::build_from_edge_list(edge_list);
    log::info!(
        "Network has {} nodes and {} edges",
        graph.node_count,
        graph.edge_count()
    );
    log::debug!("Graph memory usage: {} bytes", graph.memory_usage());

    algorithms::prune_small_components(&graph, mininode)
}

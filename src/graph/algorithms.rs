//! Graph algorithms for cluster pruning

use crate::cluster::detection::component_members;
use crate::graph::CompressedGraph;
use serde::Serialize;

/// Counts recorded while pruning small components
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneStats {
    pub clusters_before: usize,
    pub clusters_after: usize,
    pub nodes_before: usize,
    pub nodes_removed: usize,
    pub edges_before: usize,
    pub edges_after: usize,
}

/// Remove every component with fewer than `mininode` nodes.
///
/// Removed nodes take their incident edges with them. A `mininode` of 0 or 1
/// keeps the graph unchanged.
pub fn prune_small_components(graph: &CompressedGraph, mininode: usize) -> (CompressedGraph, PruneStats) {
    let components = component_members(graph);

    let mut keep = vec![false; graph.node_count];
    let mut clusters_after = 0;
    for members in components.iter().filter(|members| members.len() >= mininode) {
        clusters_after += 1;
        for &node in members {
            keep[node as usize] = true;
        }
    }

    let pruned = retain_nodes(graph, &keep);
    let stats = PruneStats {
        clusters_before: components.len(),
        clusters_after,
        nodes_before: graph.node_count,
        nodes_removed: graph.node_count - pruned.node_count,
        edges_before: graph.edge_count(),
        edges_after: pruned.edge_count(),
    };

    log::info!(
        "Pruned components below {} nodes: {} -> {} clusters, removed {} nodes",
        mininode,
        stats.clusters_before,
        stats.clusters_after,
        stats.nodes_removed
    );

    (pruned, stats)
}

/// Extract the subgraph induced by the nodes whose mask entry is true.
///
/// Surviving nodes keep their relative order, so sorted adjacency lists stay
/// sorted after reindexing.
pub fn retain_nodes(graph: &CompressedGraph, keep: &[bool]) -> CompressedGraph {
    debug_assert_eq!(keep.len(), graph.node_count);

    // Mapping from original to subgraph indices
    let mut orig_to_sub = vec![u32::MAX; graph.node_count];
    let mut next = 0u32;
    for (node, &kept) in keep.iter().enumerate() {
        if kept {
            orig_to_sub[node] = next;
            next += 1;
        }
    }

    let sub_count = next as usize;
    let mut subgraph = CompressedGraph::with_capacity(sub_count, graph.edge_count());
    subgraph.offsets.push(0);

    let mut offset = 0;
    for node in (0..graph.node_count).filter(|&node| keep[node]) {
        for &target in graph.neighbors(node) {
            let mapped = orig_to_sub[target as usize];
            // Only include edges where both endpoints survive
            if mapped != u32::MAX {
                subgraph.edges.push(mapped);
                offset += 1;
            }
        }
        subgraph.offsets.push(offset);
        subgraph.node_ids.push(graph.node_ids[node].clone());
    }

    subgraph.node_count = sub_count;
    subgraph
}

//! Reassembly of the protein graph after co-conservation filtering

use crate::cluster::detection::count_components;
use crate::config::EdgePolicy;
use crate::graph::builder::GraphBuilder;
use crate::graph::CompressedGraph;
use crate::ids::ProteinId;
use std::collections::{BTreeSet, HashSet};

/// The surviving protein graph and what is reported about it
#[derive(Debug, Clone)]
pub struct FilteredGraph {
    pub graph: CompressedGraph,

    /// Connected components of `graph`
    pub component_count: usize,

    /// Retained ids that the input flagged as cluster anchors
    pub representatives: BTreeSet<String>,

    /// Edges with exactly one retained endpoint, kept or not depending on the
    /// edge policy
    pub dangling_edges: usize,
}

/// Rebuild the protein graph from the retained protein ids.
///
/// Retained ids become nodes even when isolated. Edges of `protein_graph` are
/// kept according to `policy`; under [`EdgePolicy::TouchingRetained`] the
/// far endpoint of a kept edge joins the node set.
pub fn assemble_filtered_graph(
    protein_graph: &CompressedGraph,
    retained: &BTreeSet<ProteinId>,
    central_ids: &HashSet<&str>,
    policy: EdgePolicy,
) -> FilteredGraph {
    let retained_ids: BTreeSet<String> = retained.iter().map(|id| id.to_string()).collect();

    let mut is_retained = vec![false; protein_graph.node_count];
    for (idx, id) in protein_graph.node_ids.iter().enumerate() {
        is_retained[idx] = retained_ids.contains(id);
    }

    let mut builder = GraphBuilder::with_capacity(retained_ids.len());
    for id in &retained_ids {
        builder.get_or_create_node(id);
    }

    let mut dangling_edges = 0;
    for (src, dst) in protein_graph.undirected_edges() {
        let src_kept = is_retained[src as usize];
        let dst_kept = is_retained[dst as usize];
        if !src_kept && !dst_kept {
            continue;
        }
        if src_kept != dst_kept {
            dangling_edges += 1;
            if policy == EdgePolicy::BothRetained {
                continue;
            }
        }
        builder.add_edge(protein_graph.node_id(src as usize), protein_graph.node_id(dst as usize));
    }

    let graph = builder.build();
    let component_count = count_components(&graph);

    let representatives: BTreeSet<String> = retained_ids
        .iter()
        .filter(|id| central_ids.contains(id.as_str()))
        .cloned()
        .collect();

    log::info!(
        "Filtered protein graph has {} nodes, {} edges, {} clusters and {} representative nodes",
        graph.node_count,
        graph.edge_count(),
        component_count,
        representatives.len()
    );
    if dangling_edges > 0 {
        log::warn!(
            "{} edges join a retained protein to a removed one ({} policy)",
            dangling_edges,
            policy
        );
    }

    FilteredGraph {
        graph,
        component_count,
        representatives,
        dangling_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protein_graph(edges: &[(&str, &str)]) -> CompressedGraph {
        let mut builder = GraphBuilder::with_capacity(edges.len());
        for (a, b) in edges {
            builder.add_edge(a, b);
        }
        builder.build()
    }

    fn retained(raw: &[&str]) -> BTreeSet<ProteinId> {
        raw.iter().map(|id| ProteinId::parse(id).unwrap()).collect()
    }

    #[test]
    fn touching_policy_pulls_in_far_endpoints() {
        let graph = protein_graph(&[("A_#0", "B_#0"), ("B_#0", "C_#0"), ("D_#0", "E_#0")]);
        let central: HashSet<&str> = ["A_#0", "D_#0"].into_iter().collect();

        let filtered = assemble_filtered_graph(
            &graph,
            &retained(&["A_#0", "B_#0"]),
            &central,
            EdgePolicy::TouchingRetained,
        );

        assert_eq!(filtered.graph.node_count, 3);
        assert_eq!(filtered.graph.edge_count(), 2);
        assert_eq!(filtered.component_count, 1);
        assert_eq!(filtered.dangling_edges, 1);
        assert_eq!(filtered.representatives, BTreeSet::from(["A_#0".to_string()]));
    }

    #[test]
    fn both_retained_policy_drops_dangling_edges() {
        let graph = protein_graph(&[("A_#0", "B_#0"), ("B_#0", "C_#0")]);
        let filtered = assemble_filtered_graph(
            &graph,
            &retained(&["A_#0", "B_#0"]),
            &HashSet::new(),
            EdgePolicy::BothRetained,
        );

        let mut ids = filtered.graph.node_ids.clone();
        ids.sort();
        assert_eq!(ids, vec!["A_#0", "B_#0"]);
        assert_eq!(filtered.graph.edge_count(), 1);
        assert_eq!(filtered.dangling_edges, 1);
    }

    #[test]
    fn isolated_retained_ids_are_separate_components() {
        let graph = protein_graph(&[("A_#0", "B_#0")]);
        let filtered = assemble_filtered_graph(
            &graph,
            &retained(&["A_#0", "Z_#9"]),
            &HashSet::new(),
            EdgePolicy::BothRetained,
        );
        assert_eq!(filtered.graph.node_count, 2);
        assert_eq!(filtered.component_count, 2);
    }
}

//! Graph construction module

use crate::data::EdgeList;
use crate::graph::CompressedGraph;
use std::collections::HashMap;

/// Builder for incrementally constructing an undirected CompressedGraph
pub struct GraphBuilder {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs
    node_ids: Vec<String>,

    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,

    /// Self-loop rows seen (dropped, but their node is kept)
    self_loops: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            self_loops: 0,
        }
    }

    /// Get or create a node index for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());

        idx
    }

    /// Add an undirected edge. A self-loop registers its node but no edge,
    /// so it never counts toward component size.
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        if src_idx == dst_idx {
            self.self_loops += 1;
            return;
        }

        self.adjacency_lists[src_idx as usize].push(dst_idx);
        self.adjacency_lists[dst_idx as usize].push(src_idx);
    }

    /// Number of self-loop rows dropped so far
    pub fn self_loops(&self) -> usize {
        self.self_loops
    }

    /// Build the compressed graph
    pub fn build(mut self) -> CompressedGraph {
        // Sort, then dedup repeated and reversed rows
        for list in &mut self.adjacency_lists {
            list.sort_unstable();
            list.dedup();
        }

        let node_count = self.node_ids.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);

        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        let mut edges = Vec::with_capacity(offset as usize);
        for list in &self.adjacency_lists {
            edges.extend_from_slice(list);
        }

        CompressedGraph {
            node_count,
            offsets,
            edges,
            node_ids: self.node_ids,
        }
    }
}

/// Build an undirected graph from an edge list
pub fn build_from_edge_list(edge_list: &EdgeList) -> CompressedGraph {
    let mut builder = GraphBuilder::with_capacity(edge_list.len());
    for (src, dst) in &edge_list.pairs {
        builder.add_edge(src, dst);
    }

    if builder.self_loops() > 0 {
        log::debug!(
            "Dropped {} self-loop edges from {}",
            builder.self_loops(),
            edge_list.path.display()
        );
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_edges_symmetrically_without_duplicates() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge("a", "b");
        builder.add_edge("b", "a");
        builder.add_edge("a", "b");
        builder.add_edge("b", "c");
        let graph = builder.build();

        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(2), &[1]);
        assert_eq!(graph.undirected_edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn self_loops_keep_the_node_but_not_the_edge() {
        let mut builder = GraphBuilder::with_capacity(2);
        builder.add_edge("x", "x");
        builder.add_edge("y", "z");
        assert_eq!(builder.self_loops(), 1);

        let graph = builder.build();
        assert_eq!(graph.node_count, 3);
        assert!(graph.neighbors(0).is_empty());
        assert_eq!(graph.edge_count(), 1);
    }
}

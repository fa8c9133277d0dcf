//! Cluster detection algorithms

use crate::cluster::metrics::calculate_density;
use crate::cluster::Cluster;
use crate::graph::CompressedGraph;
use rayon::prelude::*;
use std::collections::HashMap;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set, valid at roots (for union by size)
    size: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        // Path compression, iterative so long chains cannot overflow the stack
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        let size_x = self.size[root_x as usize];
        let size_y = self.size[root_y as usize];

        if size_x > size_y {
            self.parent[root_y as usize] = root_x;
            self.size[root_x as usize] += size_y;
        } else {
            self.parent[root_x as usize] = root_y;
            self.size[root_y as usize] += size_x;
        }
    }
}

/// Group node indices by connected component.
///
/// Members are sorted ascending; components are ordered by size (largest
/// first), ties broken by smallest member, so the result depends only on the
/// graph.
pub fn component_members(graph: &CompressedGraph) -> Vec<Vec<u32>> {
    let mut sets = DisjointSets::new(graph.node_count);
    for (src, dst) in graph.undirected_edges() {
        sets.union(src, dst);
    }

    let mut by_root: HashMap<u32, Vec<u32>> = HashMap::new();
    for node in 0..graph.node_count as u32 {
        let root = sets.find(node);
        by_root.entry(root).or_default().push(node);
    }

    // Nodes were visited in ascending order, so each member list is sorted
    let mut components: Vec<Vec<u32>> = by_root.into_values().collect();
    components.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));
    components
}

/// Count connected components without materializing them
pub fn count_components(graph: &CompressedGraph) -> usize {
    let mut sets = DisjointSets::new(graph.node_count);
    for (src, dst) in graph.undirected_edges() {
        sets.union(src, dst);
    }

    (0..graph.node_count as u32)
        .filter(|&node| sets.find(node) == node)
        .count()
}

/// Find connected components of at least `min_cluster_size` nodes
pub fn find_connected_components(graph: &CompressedGraph, min_cluster_size: usize) -> Vec<Cluster> {
    log::debug!(
        "Finding connected components in graph with {} nodes and {} edges",
        graph.node_count,
        graph.edge_count()
    );

    let components: Vec<Vec<u32>> = component_members(graph)
        .into_iter()
        .filter(|members| members.len() >= min_cluster_size)
        .collect();

    let clusters: Vec<Cluster> = components
        .into_par_iter()
        .enumerate()
        .map(|(id, members)| {
            let density = calculate_density(graph, &members);
            Cluster {
                id: id as u32,
                size: members.len(),
                members,
                density,
            }
        })
        .collect();

    log::debug!(
        "Found {} clusters with {} or more members",
        clusters.len(),
        min_cluster_size
    );

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn graph(edges: &[(&str, &str)]) -> CompressedGraph {
        let mut builder = GraphBuilder::with_capacity(edges.len());
        for (a, b) in edges {
            builder.add_edge(a, b);
        }
        builder.build()
    }

    #[test]
    fn union_find_tracks_set_sizes() {
        let mut sets = DisjointSets::new(5);
        sets.union(0, 1);
        sets.union(1, 2);
        sets.union(3, 4);
        let (big, small) = (sets.find(2), sets.find(4));
        assert_eq!(sets.size[big as usize], 3);
        assert_eq!(sets.size[small as usize], 2);
        assert_eq!(sets.find(0), sets.find(2));
        assert_ne!(sets.find(0), sets.find(3));
    }

    #[test]
    fn components_are_ordered_by_size() {
        let g = graph(&[("a", "b"), ("c", "d"), ("d", "e"), ("f", "f")]);
        let components = component_members(&g);
        let sizes: Vec<usize> = components.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert_eq!(count_components(&g), 3);
    }

    #[test]
    fn clusters_below_minimum_are_skipped() {
        let g = graph(&[("a", "b"), ("b", "c"), ("d", "e")]);
        let clusters = find_connected_components(&g, 3);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].size, 3);
        assert_eq!(clusters[0].id, 0);
    }
}

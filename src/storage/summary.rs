//! Run summary written as `CLUSTER_INFO` text and JSON

use crate::cluster::metrics::ClusterSizeStats;
use crate::graph::algorithms::PruneStats;
use serde::Serialize;

/// Parameters and counts describing one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub prot_tsv: String,
    pub array_tsv: String,
    pub outdir: String,
    pub coverage: f64,
    pub mininode: usize,
    pub chunk_size: usize,
    pub workers: usize,
    pub edge_policy: String,

    pub array_pruning: PruneStats,
    pub protein_pruning: PruneStats,
    pub array_clusters: ClusterSizeStats,
    pub protein_clusters: ClusterSizeStats,

    /// Distinct protein ids in the input edge list
    pub input_proteins: usize,
    pub coconserved_pairs: usize,
    pub updated_protein_clusters: usize,
    pub removed_after_coconservation: usize,
    pub removed_in_total: usize,
    pub remaining_proteins: usize,
    pub remaining_arrays: usize,
    pub retained_array_nodes: usize,
    pub representative_nodes: usize,
    pub dangling_edges: usize,
    pub elapsed_seconds: f64,
}

impl RunSummary {
    /// `key: value` pairs in CLUSTER_INFO order
    pub fn info_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("prot_tsv", self.prot_tsv.clone()),
            ("array_tsv", self.array_tsv.clone()),
            ("outdir", self.outdir.clone()),
            ("coverage", self.coverage.to_string()),
            ("mininode", self.mininode.to_string()),
            ("chunk_size", self.chunk_size.to_string()),
            ("workers", self.workers.to_string()),
            ("edge_policy", self.edge_policy.clone()),
            (
                "array_net_clusters",
                format!("{} clusters", self.array_pruning.clusters_before),
            ),
            (
                "array_net_clusters_after_mininode",
                format!("{} clusters", self.array_pruning.clusters_after),
            ),
            ("number_of_array_filter_on_mininode", self.array_pruning.nodes_removed.to_string()),
            (
                "protein_net_clusters",
                format!("{} clusters", self.protein_pruning.clusters_before),
            ),
            (
                "protein_net_clusters_after_mininode",
                format!("{} clusters", self.protein_pruning.clusters_after),
            ),
            ("number_of_protein_filter_on_mininode", self.protein_pruning.nodes_removed.to_string()),
            (
                "proteins_after_mininode",
                (self.protein_pruning.nodes_before - self.protein_pruning.nodes_removed).to_string(),
            ),
            ("coconserved_pairs", self.coconserved_pairs.to_string()),
            (
                "updated_protein_net_clusters",
                format!("{} clusters", self.updated_protein_clusters),
            ),
            (
                "removed_protein_number_after_co-conservation",
                self.removed_after_coconservation.to_string(),
            ),
            ("removed_protein_in_total", self.removed_in_total.to_string()),
            ("remaining_proteins", self.remaining_proteins.to_string()),
            ("remaining_arrays", self.remaining_arrays.to_string()),
            ("retained_array_nodes", self.retained_array_nodes.to_string()),
            ("prot_representative_nodes", self.representative_nodes.to_string()),
            ("dangling_edges", self.dangling_edges.to_string()),
            ("total_time_used", format!("{:.2} seconds", self.elapsed_seconds)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_report_pruning_and_timing() {
        let summary = RunSummary {
            coverage: 0.5,
            mininode: 2,
            protein_pruning: PruneStats {
                clusters_before: 4,
                clusters_after: 1,
                nodes_before: 10,
                nodes_removed: 6,
                edges_before: 8,
                edges_after: 3,
            },
            elapsed_seconds: 1.234,
            ..Default::default()
        };

        let lines = summary.info_lines();
        let get = |key: &str| {
            lines
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("coverage"), "0.5");
        assert_eq!(get("protein_net_clusters"), "4 clusters");
        assert_eq!(get("proteins_after_mininode"), "4");
        assert_eq!(get("total_time_used"), "1.23 seconds");
    }
}

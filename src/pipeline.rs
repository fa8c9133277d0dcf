//! End-to-end co-conservation run

use crate::cluster::detection::find_connected_components;
use crate::cluster::metrics::ClusterSizeStats;
use crate::coconservation::assemble::{assemble_filtered_graph, FilteredGraph};
use crate::coconservation::scheduler::{schedule_pairs, ChunkOutcome, SchedulerConfig};
use crate::coconservation::{array_clusters, protein_clusters, ArrayCluster, ProteinCluster, RetainedSet};
use crate::config::Config;
use crate::data::{load_edge_list, EdgeList};
use crate::error::Result;
use crate::graph::algorithms::PruneStats;
use crate::graph::{build_cluster_graph, CompressedGraph};
use crate::ids::NodeKind;
use crate::storage::summary::RunSummary;
use crate::storage::{save_results, ReportArtifacts};
use anyhow::Context;
use std::time::Instant;

/// Everything the filter computes before anything is written
#[derive(Debug, Clone)]
pub struct CoConservation {
    /// Protein graph after small-cluster pruning
    pub protein_graph: CompressedGraph,
    pub array_pruning: PruneStats,
    pub protein_pruning: PruneStats,
    pub array_cluster_stats: ClusterSizeStats,
    pub protein_cluster_stats: ClusterSizeStats,
    pub array_clusters: Vec<ArrayCluster>,
    pub protein_clusters: Vec<ProteinCluster>,
    pub outcome: ChunkOutcome,
    pub retained: RetainedSet,
    pub filtered: FilteredGraph,
}

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub artifacts: ReportArtifacts,
}

/// Filter two in-memory edge lists. `config` is expected to be validated.
pub fn filter_edge_lists(
    array_edges: &EdgeList,
    protein_edges: &EdgeList,
    config: &Config,
) -> Result<CoConservation> {
    // 1. Build and prune both cluster graphs
    let (array_graph, array_pruning) = build_cluster_graph(array_edges, config.mininode);
    let (protein_graph, protein_pruning) = build_cluster_graph(protein_edges, config.mininode);

    // 2. Materialize clusters
    let array_components = find_connected_components(&array_graph, 0);
    let protein_components = find_connected_components(&protein_graph, 0);
    let array_clusters = array_clusters(&array_graph, &array_components);
    let protein_clusters = protein_clusters(&protein_graph, &protein_components)?;

    // 3. Evaluate every array/protein cluster pair
    let scheduler = SchedulerConfig {
        threshold: config.coverage,
        chunk_size: config.chunk_size,
        workers: config.resolved_workers(),
        chunk_timeout: config.chunk_timeout,
    };
    let outcome = schedule_pairs(&array_clusters, &protein_clusters, &scheduler)?;
    let retained = RetainedSet::from_outcome(&outcome, &array_clusters, &protein_clusters);

    log::info!(
        "Retained {} of {} proteins and {} of {} arrays",
        retained.proteins.len(),
        protein_graph.node_count,
        retained.arrays.len(),
        array_graph.node_count
    );

    // 4. Rebuild the protein graph around the retained ids
    let central_ids = protein_edges.central_ids();
    let filtered = assemble_filtered_graph(
        &protein_graph,
        &retained.proteins,
        &central_ids,
        config.edge_policy,
    );

    Ok(CoConservation {
        array_cluster_stats: ClusterSizeStats::from_clusters(&array_components),
        protein_cluster_stats: ClusterSizeStats::from_clusters(&protein_components),
        protein_graph,
        array_pruning,
        protein_pruning,
        array_clusters,
        protein_clusters,
        outcome,
        retained,
        filtered,
    })
}

/// Load both edge lists, filter them and write the versioned artifacts
pub fn run(config: Config) -> anyhow::Result<RunReport> {
    let start = Instant::now();
    let config = config.validate()?;

    log::info!("Array clusters: {}", config.array_edges.display());
    log::info!("Protein clusters: {}", config.protein_edges.display());
    log::info!(
        "Coverage threshold {}, mininode {}, chunk size {}",
        config.coverage,
        config.mininode,
        config.chunk_size
    );

    let protein_edges = load_edge_list(&config.protein_edges, NodeKind::Protein)
        .context("Failed to load protein edge list")?;
    let array_edges = load_edge_list(&config.array_edges, NodeKind::Array)
        .context("Failed to load array edge list")?;

    let result = filter_edge_lists(&array_edges, &protein_edges, &config)
        .context("Co-conservation filtering failed")?;

    let summary = summarize(&config, &protein_edges, &result, start.elapsed().as_secs_f64());
    let artifacts = save_results(
        &config.output_dir,
        &result.filtered,
        &result.retained,
        &result.outcome.pairs,
        &result.protein_clusters,
        &summary,
    )
    .with_context(|| format!("Failed to write results to {}", config.output_dir.display()))?;

    log::info!("Total finished in {:.2} seconds", start.elapsed().as_secs_f64());

    Ok(RunReport { summary, artifacts })
}

/// Collect the run parameters and counts reported in CLUSTER_INFO
pub fn summarize(
    config: &Config,
    protein_edges: &EdgeList,
    result: &CoConservation,
    elapsed_seconds: f64,
) -> RunSummary {
    let input_proteins = protein_edges.distinct_ids().len();
    let remaining_proteins = result.filtered.graph.node_count;

    RunSummary {
        prot_tsv: config.protein_edges.display().to_string(),
        array_tsv: config.array_edges.display().to_string(),
        outdir: config.output_dir.display().to_string(),
        coverage: config.coverage,
        mininode: config.mininode,
        chunk_size: config.chunk_size,
        workers: config.resolved_workers(),
        edge_policy: config.edge_policy.to_string(),
        array_pruning: result.array_pruning.clone(),
        protein_pruning: result.protein_pruning.clone(),
        array_clusters: result.array_cluster_stats.clone(),
        protein_clusters: result.protein_cluster_stats.clone(),
        input_proteins,
        coconserved_pairs: result.outcome.pairs.len(),
        updated_protein_clusters: result.filtered.component_count,
        removed_after_coconservation: result
            .protein_graph
            .node_count
            .saturating_sub(result.retained.proteins.len()),
        removed_in_total: input_proteins.saturating_sub(remaining_proteins),
        remaining_proteins,
        remaining_arrays: result.retained.protein_contexts().len(),
        retained_array_nodes: result.retained.arrays.len(),
        representative_nodes: result.filtered.representatives.len(),
        dangling_edges: result.filtered.dangling_edges,
        elapsed_seconds,
    }
}

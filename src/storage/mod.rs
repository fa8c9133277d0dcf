//! Results persistence module
//!
//! Every artifact is written under its own next free version number, so a
//! rerun into the same directory never overwrites earlier results.

pub mod graphml;
pub mod summary;
pub mod versioning;

use crate::coconservation::assemble::FilteredGraph;
use crate::coconservation::coverage::round_coverage;
use crate::coconservation::scheduler::PairRecord;
use crate::coconservation::{ProteinCluster, RetainedSet};
use crate::error::{CoConservationError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use summary::RunSummary;
use versioning::next_versioned_path;

/// Header of the kept-id CSV files
const KEPT_COLUMN: &str = "remained_nodes";

const PAIR_COLUMNS: [&str; 4] = [
    "array_cluster",
    "protein_cluster",
    "coverage",
    "protein_cluster_size",
];

/// Paths of the artifacts written by one run
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    pub graph: PathBuf,
    pub prot_kept: PathBuf,
    pub array_kept: PathBuf,
    pub representatives: PathBuf,
    pub pairs: PathBuf,
    pub summary_json: PathBuf,
    pub cluster_info: PathBuf,
}

#[derive(Serialize)]
struct PairRow {
    array_cluster: usize,
    protein_cluster: usize,
    coverage: String,
    protein_cluster_size: usize,
}

/// Save the filtered graph and run summaries to `output_dir`
pub fn save_results(
    output_dir: &Path,
    filtered: &FilteredGraph,
    retained: &RetainedSet,
    pairs: &[PairRecord],
    proteins: &[ProteinCluster],
    summary: &RunSummary,
) -> Result<ReportArtifacts> {
    log::info!("Writing co-conservation results to {}", output_dir.display());

    let graph = next_versioned_path(output_dir, "prot_cluster", "graphml")?;
    write_with(&graph, |out| graphml::write_graphml(&filtered.graph, out))?;

    let prot_kept = next_versioned_path(output_dir, "prot_kept", "csv")?;
    write_kept_ids(&prot_kept, retained.proteins.iter().map(|id| id.to_string()))?;

    let array_kept = next_versioned_path(output_dir, "array_kept", "csv")?;
    write_kept_ids(
        &array_kept,
        retained.protein_contexts().into_iter().map(|id| id.to_string()),
    )?;

    let representatives = next_versioned_path(output_dir, "prot_representative_nodes", "txt")?;
    write_with(&representatives, |out| {
        for id in &filtered.representatives {
            writeln!(out, "{}", id)?;
        }
        Ok(())
    })?;

    let pairs_path = next_versioned_path(output_dir, "coconserved_pairs", "tsv")?;
    save_pairs(&pairs_path, pairs, proteins)?;

    let summary_json = next_versioned_path(output_dir, "summary", "json")?;
    write_with(&summary_json, |out| {
        serde_json::to_writer_pretty(&mut *out, summary)?;
        writeln!(out)
    })?;

    let cluster_info = next_versioned_path(output_dir, "CLUSTER_INFO", "txt")?;
    write_with(&cluster_info, |out| {
        for (key, value) in summary.info_lines() {
            writeln!(out, "{}: {}", key, value)?;
        }
        Ok(())
    })?;

    log::info!("Results saved successfully");

    Ok(ReportArtifacts {
        graph,
        prot_kept,
        array_kept,
        representatives,
        pairs: pairs_path,
        summary_json,
        cluster_info,
    })
}

/// Create `path` and hand a buffered writer to `write`
fn write_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let output_error = |source: std::io::Error| CoConservationError::OutputIo {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(output_error)?;
    let mut out = BufWriter::new(file);
    write(&mut out).map_err(output_error)?;
    out.flush().map_err(output_error)
}

fn write_kept_ids<I>(path: &Path, ids: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([KEPT_COLUMN])?;
    for id in ids {
        writer.write_record([id])?;
    }
    writer.flush().map_err(|source| CoConservationError::OutputIo {
        path: path.to_path_buf(),
        source,
    })
}

fn save_pairs(path: &Path, pairs: &[PairRecord], proteins: &[ProteinCluster]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?;
    // Header written explicitly so a run with no passing pairs still has one
    writer.write_record(PAIR_COLUMNS)?;
    for pair in pairs {
        writer.serialize(PairRow {
            array_cluster: pair.array_cluster,
            protein_cluster: pair.protein_cluster,
            coverage: format!("{:.2}", round_coverage(pair.coverage)),
            protein_cluster_size: proteins[pair.protein_cluster].size(),
        })?;
    }
    writer.flush().map_err(|source| CoConservationError::OutputIo {
        path: path.to_path_buf(),
        source,
    })
}

//! Chunked parallel evaluation of array × protein cluster pairs

use crate::coconservation::coverage::{coverage, passes};
use crate::coconservation::{ArrayCluster, ProteinCluster};
use crate::config::DEFAULT_CHUNK_SIZE;
use crate::error::{CoConservationError, Result};
use rayon::prelude::*;
use std::any::Any;
use std::collections::BTreeSet;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Pairs evaluated between cancellation and timeout checks
const CHECKPOINT_INTERVAL: usize = 1024;

/// Scheduling parameters
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Minimum coverage for a pair to pass
    pub threshold: f64,

    /// Pairs per chunk, capped at the number of pairs
    pub chunk_size: usize,

    /// Threads in the worker pool
    pub workers: usize,

    /// Per-chunk time limit
    pub chunk_timeout: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: num_cpus::get(),
            chunk_timeout: None,
        }
    }
}

/// A co-conserved pair with a non-empty intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairRecord {
    pub array_cluster: usize,
    pub protein_cluster: usize,
    pub coverage: f64,
}

/// Passing clusters and pairs collected by one or more chunks
#[derive(Debug, Clone, Default)]
pub struct ChunkOutcome {
    /// Protein clusters in at least one passing pair
    pub protein_clusters: BTreeSet<usize>,

    /// Array clusters in at least one passing pair
    pub array_clusters: BTreeSet<usize>,

    /// Passing pairs with coverage above zero
    pub pairs: Vec<PairRecord>,
}

impl ChunkOutcome {
    /// Mark both clusters of a passing pair as retained. Only pairs that share
    /// an array context get a record, so a zero threshold does not store the
    /// whole cross product.
    fn record(&mut self, pair: PairRecord) {
        self.protein_clusters.insert(pair.protein_cluster);
        self.array_clusters.insert(pair.array_cluster);
        if pair.coverage > 0.0 {
            self.pairs.push(pair);
        }
    }

    /// Union of two outcomes
    pub fn merge(mut self, mut other: ChunkOutcome) -> ChunkOutcome {
        self.protein_clusters.append(&mut other.protein_clusters);
        self.array_clusters.append(&mut other.array_clusters);
        self.pairs.append(&mut other.pairs);
        self
    }

    /// Sort pair records so output does not depend on chunk completion order
    fn into_sorted(mut self) -> ChunkOutcome {
        self.pairs
            .sort_unstable_by_key(|pair| (pair.array_cluster, pair.protein_cluster));
        self
    }
}

/// Split `0..total` into contiguous chunks of at most `chunk_size` pairs
pub fn chunk_ranges(total: usize, chunk_size: usize) -> Vec<Range<usize>> {
    let chunk_size = chunk_size.max(1).min(total.max(1));
    (0..total)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(total))
        .collect()
}

/// Evaluate every array/protein cluster pair by coverage
pub fn schedule_pairs(
    arrays: &[ArrayCluster],
    proteins: &[ProteinCluster],
    config: &SchedulerConfig,
) -> Result<ChunkOutcome> {
    schedule_pairs_with(arrays, proteins, config, |array, protein| {
        coverage(&array.members, &protein.profile)
    })
}

/// Evaluate every pair with a custom evaluator.
///
/// Pair `i` of the cross product is `(arrays[i / P], proteins[i % P])`. Chunks
/// share the cluster slices read-only and run on the current rayon pool when
/// it has `config.workers` threads, otherwise on a pool of that size built
/// for the call. The first failing chunk raises a cancellation flag that
/// the others poll, and its error is returned instead of a partial union.
pub fn schedule_pairs_with<F>(
    arrays: &[ArrayCluster],
    proteins: &[ProteinCluster],
    config: &SchedulerConfig,
    evaluate: F,
) -> Result<ChunkOutcome>
where
    F: Fn(&ArrayCluster, &ProteinCluster) -> f64 + Sync,
{
    let total = arrays.len().checked_mul(proteins.len()).ok_or_else(|| {
        CoConservationError::InvalidConfig(format!(
            "{} array clusters × {} protein clusters overflows the pair index",
            arrays.len(),
            proteins.len()
        ))
    })?;

    if total == 0 {
        log::info!(
            "No cluster pairs to evaluate ({} array clusters, {} protein clusters)",
            arrays.len(),
            proteins.len()
        );
        return Ok(ChunkOutcome::default());
    }

    let chunks = chunk_ranges(total, config.chunk_size);
    let workers = config.workers.max(1);
    log::info!(
        "Analyzing co-conservation of {} pairs in {} chunks on {} workers",
        total,
        chunks.len(),
        workers
    );

    let cancelled = AtomicBool::new(false);
    let completed = AtomicUsize::new(0);
    let chunk_count = chunks.len();

    let evaluate_all = || {
        chunks
            .into_par_iter()
            .enumerate()
            .map(|(chunk, range)| {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    evaluate_chunk(chunk, range, arrays, proteins, config, &evaluate, &cancelled)
                }))
                .unwrap_or_else(|payload| {
                    Err(CoConservationError::WorkerFailure {
                        chunk,
                        reason: panic_message(payload.as_ref()),
                    })
                });

                match &result {
                    Ok(_) => {
                        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log::debug!("Finished chunk {} ({}/{})", chunk, done, chunk_count);
                    }
                    Err(err) => {
                        log::error!("{}", err);
                        cancelled.store(true, Ordering::Relaxed);
                    }
                }
                result
            })
            .try_reduce(ChunkOutcome::default, |a, b| Ok(a.merge(b)))
    };

    let outcome = if rayon::current_num_threads() == workers {
        evaluate_all()?
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|idx| format!("coconserve-worker-{}", idx))
            .build()?;
        pool.install(evaluate_all)?
    };

    log::info!(
        "Found {} co-conserved pairs covering {} protein clusters and {} array clusters",
        outcome.pairs.len(),
        outcome.protein_clusters.len(),
        outcome.array_clusters.len()
    );

    Ok(outcome.into_sorted())
}

fn evaluate_chunk<F>(
    chunk: usize,
    range: Range<usize>,
    arrays: &[ArrayCluster],
    proteins: &[ProteinCluster],
    config: &SchedulerConfig,
    evaluate: &F,
    cancelled: &AtomicBool,
) -> Result<ChunkOutcome>
where
    F: Fn(&ArrayCluster, &ProteinCluster) -> f64,
{
    let started = Instant::now();
    let protein_count = proteins.len();
    let mut outcome = ChunkOutcome::default();

    for (n, pair) in range.enumerate() {
        if n > 0 && n % CHECKPOINT_INTERVAL == 0 {
            // Another chunk already failed; whatever is returned here is
            // discarded with the batch.
            if cancelled.load(Ordering::Relaxed) {
                return Ok(outcome);
            }
            if let Some(limit) = config.chunk_timeout {
                if started.elapsed() > limit {
                    return Err(CoConservationError::ChunkTimeout { chunk, limit });
                }
            }
        }

        let array = &arrays[pair / protein_count];
        let protein = &proteins[pair % protein_count];
        let cov = evaluate(array, protein);
        if passes(cov, config.threshold) {
            outcome.record(PairRecord {
                array_cluster: array.index,
                protein_cluster: protein.index,
                coverage: cov,
            });
        }
    }

    Ok(outcome)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}

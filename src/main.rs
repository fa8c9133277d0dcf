use anyhow::Result;
use clap::Parser;
use coconserve::{Config, EdgePolicy};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(
    name = "coconserve",
    about = "Array-protein co-conservation analysis of CRISPR array and protein clusters"
)]
struct Cli {
    /// Array cluster edge list (two-column TSV)
    #[clap(short = 'a', long)]
    array_cluster: PathBuf,

    /// Protein cluster edge list (two-column TSV, first column = representative)
    #[clap(short = 'p', long)]
    prot_cluster: PathBuf,

    /// Coverage [0, 1]; higher values are stricter. Out-of-range values are clamped
    #[clap(short = 'c', long, default_value = "0.3", allow_negative_numbers = true)]
    coverage: f64,

    /// Minimum number of nodes in a cluster
    #[clap(short = 'm', long = "mininode-num", default_value = "5")]
    mininode: usize,

    /// Number of worker threads (0 = use all available cores)
    #[clap(short = 'n', long = "num-threads", default_value = "0")]
    threads: usize,

    /// Output directory for versioned results
    #[clap(short = 'o', long)]
    outdir: PathBuf,

    /// Cluster pairs evaluated per chunk
    #[clap(long, default_value = "200000")]
    chunk_size: usize,

    /// Abort the run if a single chunk takes longer than this many seconds
    #[clap(long)]
    chunk_timeout_secs: Option<u64>,

    /// Keep only protein edges whose endpoints are both retained
    #[clap(long)]
    both_endpoints: bool,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config {
        array_edges: args.array_cluster,
        protein_edges: args.prot_cluster,
        output_dir: args.outdir,
        coverage: args.coverage,
        mininode: args.mininode,
        chunk_size: args.chunk_size,
        workers: num_threads,
        chunk_timeout: args.chunk_timeout_secs.map(Duration::from_secs),
        edge_policy: if args.both_endpoints {
            EdgePolicy::BothRetained
        } else {
            EdgePolicy::TouchingRetained
        },
    };

    log::info!("Starting array-protein co-conservation analysis");

    let report = coconserve::run(config)?;

    log::info!(
        "Analysis complete: {} proteins and {} arrays remain. Summary written to {}",
        report.summary.remaining_proteins,
        report.summary.remaining_arrays,
        report.artifacts.cluster_info.display()
    );

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use kamrat::{config, pipeline, JobConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Waits for all M shard blobs in the work directory, then merges them,
/// computes top-N recommendations per user, and writes the output file(s).
#[derive(Parser, Debug)]
struct Args {
    /// Directory the mapper nodes publish into
    #[arg(long)]
    work_dir: PathBuf,
    /// Total shard count M
    #[arg(long)]
    shards: usize,
    /// Recommendations per user
    #[arg(long, default_value_t = config::DEFAULT_TOP_N)]
    top_n: usize,
    /// Barrier poll interval in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,
    /// Barrier deadline in seconds; a missing shard past this is an error
    #[arg(long, default_value_t = config::DEFAULT_BARRIER_DEADLINE_SECS)]
    barrier_deadline_secs: u64,
    /// Recommendations output path
    #[arg(long, default_value = "recommendations.txt")]
    output: PathBuf,
    /// Optional selected-subset output path
    #[arg(long)]
    selected_output: Option<PathBuf>,
    /// Comma-separated user ids for the selected-subset output
    #[arg(long, value_delimiter = ',')]
    selected_ids: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let mut cfg = JobConfig::new(&args.work_dir, &args.output);
    cfg.shards = args.shards;
    cfg.top_n = args.top_n;
    cfg.poll_interval = Duration::from_millis(args.poll_interval_ms);
    cfg.barrier_deadline = Duration::from_secs(args.barrier_deadline_secs);
    cfg.selected_output = args.selected_output;
    cfg.selected_ids = args.selected_ids;
    pipeline::run_aggregator(&cfg)?;
    Ok(())
}

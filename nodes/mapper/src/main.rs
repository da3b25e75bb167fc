use anyhow::Result;
use clap::Parser;
use kamrat::{codec, pipeline, JobConfig};
use std::path::PathBuf;

/// Maps one shard of the adjacency-list input and publishes the shard's
/// compressed intermediate blob (plus completion marker) into the shared
/// work directory.
#[derive(Parser, Debug)]
struct Args {
    /// Adjacency-list input file
    #[arg(long)]
    input: PathBuf,
    /// Directory where intermediate blobs are published
    #[arg(long)]
    work_dir: PathBuf,
    /// This node's shard index, 1-based
    #[arg(long)]
    shard: usize,
    /// Total shard count M
    #[arg(long)]
    shards: usize,
    /// Gzip compression level, 0..=10
    #[arg(long, default_value_t = codec::DEFAULT_COMPRESSION_LEVEL)]
    compression_level: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let mut cfg = JobConfig::new(&args.work_dir, PathBuf::new()).with_input(&args.input);
    cfg.shards = args.shards;
    cfg.compression_level = args.compression_level;
    pipeline::run_mapper(&cfg, args.shard)?;
    Ok(())
}

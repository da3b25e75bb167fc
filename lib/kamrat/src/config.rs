use crate::codec::{DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL};
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_BARRIER_DEADLINE_SECS: u64 = 300;

/// Job-wide settings shared by mapper and aggregator nodes. Fixed at node
/// startup; both sides must agree on `shards` and `work_dir`.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Adjacency-list input. Only mapper-side operations read it.
    pub input: Option<PathBuf>,
    /// Directory where shard blobs and markers are published.
    pub work_dir: PathBuf,
    /// Recommendations output path.
    pub output: PathBuf,
    /// Optional selected-subset output path and the ids it is restricted to.
    pub selected_output: Option<PathBuf>,
    pub selected_ids: Vec<String>,
    /// Shard count M; shard indices are `1..=M`.
    pub shards: usize,
    pub top_n: usize,
    pub compression_level: u32,
    pub poll_interval: Duration,
    pub barrier_deadline: Duration,
}

impl JobConfig {
    pub fn new(work_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: None,
            work_dir: work_dir.into(),
            output: output.into(),
            selected_output: None,
            selected_ids: Vec::new(),
            shards: num_cpus::get().max(1),
            top_n: DEFAULT_TOP_N,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            barrier_deadline: Duration::from_secs(DEFAULT_BARRIER_DEADLINE_SECS),
        }
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.shards == 0 {
            bail!("shard count must be at least 1");
        }
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            bail!(
                "compression level {} out of range 0..={}",
                self.compression_level,
                MAX_COMPRESSION_LEVEL
            );
        }
        Ok(())
    }
}

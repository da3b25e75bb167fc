use crate::blob;
use crate::error::PipelineError;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Wait-for-all barrier between shard producers and the single aggregator.
/// The aggregator knows the expected shard count up front; the barrier either
/// sees every shard complete or reports `ShardTimeout` naming the stragglers.
pub struct Barrier {
    expected: usize,
    poll_interval: Duration,
    deadline: Duration,
}

impl Barrier {
    pub fn new(expected: usize, poll_interval: Duration, deadline: Duration) -> Self {
        Self {
            expected,
            poll_interval,
            deadline,
        }
    }

    /// Cross-process variant: polls the work directory at the fixed interval
    /// until the completion markers of shards `1..=expected` all exist.
    /// Markers are published by atomic rename after the blob itself, so a
    /// present marker never points at a partially written blob.
    pub fn wait_markers(&self, dir: &Path) -> Result<(), PipelineError> {
        let start = Instant::now();
        loop {
            let missing: Vec<usize> = (1..=self.expected)
                .filter(|&shard| !blob::marker_path(dir, shard).exists())
                .collect();
            if missing.is_empty() {
                info!(
                    shards = self.expected,
                    waited_ms = start.elapsed().as_millis() as u64,
                    "all shard markers present"
                );
                return Ok(());
            }
            if start.elapsed() >= self.deadline {
                return Err(PipelineError::ShardTimeout {
                    waited: start.elapsed(),
                    missing,
                });
            }
            debug!(
                present = self.expected - missing.len(),
                expected = self.expected,
                "awaiting shard markers"
            );
            thread::sleep(self.poll_interval);
        }
    }

    /// In-process variant: each producer sends its shard index once its blob
    /// is published. A closed channel before all shards reported counts as a
    /// timeout with the remaining shards listed as missing.
    pub fn wait_signals(&self, rx: &Receiver<usize>) -> Result<(), PipelineError> {
        let start = Instant::now();
        let mut done = vec![false; self.expected + 1];
        let mut count = 0usize;
        while count < self.expected {
            let remaining = self.deadline.saturating_sub(start.elapsed());
            match rx.recv_timeout(remaining) {
                Ok(shard) => {
                    if (1..=self.expected).contains(&shard) && !done[shard] {
                        done[shard] = true;
                        count += 1;
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    let missing = (1..=self.expected).filter(|&s| !done[s]).collect();
                    return Err(PipelineError::ShardTimeout {
                        waited: start.elapsed(),
                        missing,
                    });
                }
            }
        }
        info!(
            shards = self.expected,
            waited_ms = start.elapsed().as_millis() as u64,
            "all shard signals received"
        );
        Ok(())
    }
}

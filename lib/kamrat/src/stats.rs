use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, Default, Serialize)]
pub struct MapShardStats {
    pub shard: usize,
    pub lines_in: usize,
    pub users: usize,
    pub keys_out: usize,
    pub values_out: usize,
    pub blob_bytes: u64,
    pub wall_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateStats {
    pub shards: usize,
    pub merged_keys: usize,
    pub users_out: usize,
    pub users_with_recommendations: usize,
    pub barrier_wait_ms: u64,
    pub merge_ms: u64,
    pub reduce_ms: u64,
    pub wall_ms: u64,
}

/// One-line JSON dump of a phase's counters.
pub fn log_json<S: Serialize>(phase: &str, stats: &S) {
    match serde_json::to_string(stats) {
        Ok(json) => info!(phase, stats = %json, "phase complete"),
        Err(e) => error!(phase, "stats serialization failed: {}", e),
    }
}

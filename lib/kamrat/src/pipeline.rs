use crate::blob;
use crate::config::JobConfig;
use crate::coordinator::Barrier;
use crate::graph;
use crate::io::{ensure_dir, read_lines};
use crate::map;
use crate::merge;
use crate::partition;
use crate::reduce::{self, RecommendationMap};
use crate::stats::{self, AggregateStats, MapShardStats};
use crate::writer;
use anyhow::{bail, Context, Result};
use crossbeam_channel as channel;
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;
use tracing::info;

/// Pipeline stages; every transition is logged. The only conditional
/// transition is `AwaitingAllShards -> Merging`, which requires all M shard
/// markers (or in-process signals) within the barrier deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Mapping,
    AwaitingAllShards,
    Merging,
    Reducing,
    Writing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Loading => "loading",
            Stage::Mapping => "mapping",
            Stage::AwaitingAllShards => "awaiting_all_shards",
            Stage::Merging => "merging",
            Stage::Reducing => "reducing",
            Stage::Writing => "writing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(stage: Stage) {
    info!(stage = %stage, "entering stage");
}

/// Mapper node entry point: load the input, partition it, map this node's
/// shard, and publish the blob and completion marker.
pub fn run_mapper(cfg: &JobConfig, shard: usize) -> Result<MapShardStats> {
    cfg.validate()?;
    if shard == 0 || shard > cfg.shards {
        bail!("shard index {} out of range 1..={}", shard, cfg.shards);
    }
    let input = cfg.input.as_ref().context("input not set")?;
    enter(Stage::Loading);
    let lines = read_lines(input)?;
    let slices = partition::split_lines(lines, cfg.shards);
    enter(Stage::Mapping);
    map_one_shard(cfg, shard, &slices[shard - 1])
}

fn map_one_shard(cfg: &JobConfig, shard: usize, lines: &[String]) -> Result<MapShardStats> {
    let start = Instant::now();
    let graph = graph::load_adjacency(lines.iter().map(String::as_str));
    let grouped = map::map_shard(&graph);
    let keys_out = grouped.len();
    let values_out = grouped.values().map(|v| v.len()).sum();
    ensure_dir(&cfg.work_dir)?;
    let blob_bytes = blob::publish_blob(&cfg.work_dir, shard, &grouped, cfg.compression_level)?;
    let shard_stats = MapShardStats {
        shard,
        lines_in: lines.len(),
        users: graph.len(),
        keys_out,
        values_out,
        blob_bytes,
        wall_ms: start.elapsed().as_millis() as u64,
    };
    stats::log_json("map", &shard_stats);
    Ok(shard_stats)
}

/// Aggregator node entry point: barrier-wait on the shard markers, then
/// merge, reduce, and write.
pub fn run_aggregator(cfg: &JobConfig) -> Result<RecommendationMap> {
    cfg.validate()?;
    let barrier = Barrier::new(cfg.shards, cfg.poll_interval, cfg.barrier_deadline);
    enter(Stage::AwaitingAllShards);
    let wait_start = Instant::now();
    barrier.wait_markers(&cfg.work_dir)?;
    aggregate_published(cfg, wait_start.elapsed().as_millis() as u64)
}

/// Whole pipeline in one process: shards mapped in parallel, completion
/// signalled over a channel, then the usual merge/reduce/write. Equivalent to
/// one mapper node per shard plus the aggregator on the same work directory.
pub fn run_local(cfg: &JobConfig) -> Result<RecommendationMap> {
    cfg.validate()?;
    let input = cfg.input.as_ref().context("input not set")?;
    enter(Stage::Loading);
    let lines = read_lines(input)?;
    let slices = partition::split_lines(lines, cfg.shards);
    ensure_dir(&cfg.work_dir)?;

    enter(Stage::Mapping);
    let (tx, rx) = channel::unbounded();
    slices
        .par_iter()
        .enumerate()
        .map(|(idx, slice)| {
            let shard = idx + 1;
            let shard_stats = map_one_shard(cfg, shard, slice)?;
            let _ = tx.send(shard);
            Ok(shard_stats)
        })
        .collect::<Result<Vec<_>>>()?;
    drop(tx);

    let barrier = Barrier::new(cfg.shards, cfg.poll_interval, cfg.barrier_deadline);
    enter(Stage::AwaitingAllShards);
    let wait_start = Instant::now();
    barrier.wait_signals(&rx)?;
    aggregate_published(cfg, wait_start.elapsed().as_millis() as u64)
}

/// Merge, reduce, and write once the barrier has been crossed. Consuming a
/// blob deletes it, so this path runs at most once per published set.
fn aggregate_published(cfg: &JobConfig, barrier_wait_ms: u64) -> Result<RecommendationMap> {
    let start = Instant::now();
    enter(Stage::Merging);
    let merge_start = Instant::now();
    let mut shard_maps = Vec::with_capacity(cfg.shards);
    for shard in 1..=cfg.shards {
        shard_maps.push(blob::consume_blob(&cfg.work_dir, shard)?);
    }
    let merged = merge::merge_grouped(shard_maps)?;
    let merge_ms = merge_start.elapsed().as_millis() as u64;

    enter(Stage::Reducing);
    let reduce_start = Instant::now();
    let recommendations = reduce::reduce_grouped(&merged, cfg.top_n);
    let reduce_ms = reduce_start.elapsed().as_millis() as u64;

    enter(Stage::Writing);
    writer::write_recommendations(&cfg.output, &recommendations)?;
    if let Some(selected_path) = &cfg.selected_output {
        writer::write_selected(selected_path, &recommendations, &cfg.selected_ids)?;
    }

    stats::log_json(
        "aggregate",
        &AggregateStats {
            shards: cfg.shards,
            merged_keys: merged.len(),
            users_out: recommendations.len(),
            users_with_recommendations: recommendations
                .values()
                .filter(|recs| !recs.is_empty())
                .count(),
            barrier_wait_ms,
            merge_ms,
            reduce_ms,
            wall_ms: barrier_wait_ms + start.elapsed().as_millis() as u64,
        },
    );
    enter(Stage::Done);
    Ok(recommendations)
}

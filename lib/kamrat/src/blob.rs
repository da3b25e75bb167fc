use crate::codec;
use crate::error::PipelineError;
use crate::io::atomic_write;
use crate::map::GroupedMap;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `intermediate-<shard>.bin.gz` for shard indices `1..=M`.
pub fn blob_path(dir: &Path, shard: usize) -> PathBuf {
    dir.join(format!("intermediate-{}.{}", shard, codec::BLOB_EXTENSION))
}

/// Completion marker published after the blob itself; its presence implies a
/// whole, readable blob.
pub fn marker_path(dir: &Path, shard: usize) -> PathBuf {
    dir.join(format!("intermediate-{}.done", shard))
}

/// Encodes and publishes one shard's grouped map: blob first, marker second,
/// both via temp-then-rename. Returns the blob size in bytes.
pub fn publish_blob(dir: &Path, shard: usize, grouped: &GroupedMap, level: u32) -> Result<u64> {
    let bytes =
        codec::encode(grouped, level).with_context(|| format!("encode blob for shard {shard}"))?;
    let blob_bytes = bytes.len() as u64;
    atomic_write(&blob_path(dir, shard), &bytes)?;
    atomic_write(&marker_path(dir, shard), b"done\n")?;
    debug!(shard, blob_bytes, "published shard blob");
    Ok(blob_bytes)
}

/// Reads, decodes, and deletes one shard's blob (at-most-once consumption).
/// Decode failure is a distinct `CorruptBlob`, never "not yet ready".
pub fn consume_blob(dir: &Path, shard: usize) -> Result<GroupedMap, PipelineError> {
    let path = blob_path(dir, shard);
    let bytes = fs::read(&path).map_err(|source| PipelineError::BlobIo {
        shard,
        path: path.clone(),
        source,
    })?;
    let grouped = codec::decode(&bytes).map_err(|source| PipelineError::CorruptBlob {
        shard,
        path: path.clone(),
        source,
    })?;
    let _ = fs::remove_file(&path);
    let _ = fs::remove_file(marker_path(dir, shard));
    debug!(shard, keys = grouped.len(), "consumed shard blob");
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load_adjacency;
    use crate::map::map_shard;

    #[test]
    fn publish_then_consume_round_trips_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let grouped = map_shard(&load_adjacency(["1\t2,3"]));
        publish_blob(dir.path(), 1, &grouped, codec::DEFAULT_COMPRESSION_LEVEL).unwrap();
        assert!(blob_path(dir.path(), 1).exists());
        assert!(marker_path(dir.path(), 1).exists());

        let decoded = consume_blob(dir.path(), 1).unwrap();
        assert_eq!(decoded, grouped);
        assert!(!blob_path(dir.path(), 1).exists());
        assert!(!marker_path(dir.path(), 1).exists());
    }

    #[test]
    fn corrupt_blob_is_reported_distinctly() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(blob_path(dir.path(), 2), b"garbage").unwrap();
        fs::write(marker_path(dir.path(), 2), b"done\n").unwrap();
        match consume_blob(dir.path(), 2) {
            Err(PipelineError::CorruptBlob { shard: 2, .. }) => {}
            other => panic!("expected CorruptBlob, got {other:?}"),
        }
    }

    #[test]
    fn missing_blob_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            consume_blob(dir.path(), 3),
            Err(PipelineError::BlobIo { shard: 3, .. })
        ));
    }
}

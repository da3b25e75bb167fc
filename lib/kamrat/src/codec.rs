use crate::map::GroupedMap;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use thiserror::Error;

/// The rust backend of flate2 accepts levels 0..=10.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 10;
pub const MAX_COMPRESSION_LEVEL: u32 = 10;

/// File extension of a shard blob: bincode-packed, gzip-compressed.
pub const BLOB_EXTENSION: &str = "bin.gz";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("packing grouped map")]
    Pack(#[source] bincode::Error),
    #[error("compressing blob")]
    Compress(#[source] std::io::Error),
    #[error("decompressing blob")]
    Decompress(#[source] std::io::Error),
    #[error("unpacking grouped map")]
    Unpack(#[source] bincode::Error),
}

/// Packs a grouped map into a compact binary form and compresses it.
pub fn encode(grouped: &GroupedMap, level: u32) -> Result<Vec<u8>, CodecError> {
    let packed = bincode::serialize(grouped).map_err(CodecError::Pack)?;
    let mut encoder = GzEncoder::new(
        Vec::with_capacity(packed.len() / 2),
        Compression::new(level.min(MAX_COMPRESSION_LEVEL)),
    );
    encoder.write_all(&packed).map_err(CodecError::Compress)?;
    encoder.finish().map_err(CodecError::Compress)
}

/// Inverse of [`encode`]. Truncated or corrupted input fails with a decode
/// error, never a silent partial map.
pub fn decode(bytes: &[u8]) -> Result<GroupedMap, CodecError> {
    let mut packed = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut packed)
        .map_err(CodecError::Decompress)?;
    bincode::deserialize(&packed).map_err(CodecError::Unpack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load_adjacency;
    use crate::map::map_shard;

    #[test]
    fn round_trips_exactly() {
        let grouped = map_shard(&load_adjacency(["1\t2,3", "2\t1,3", "4\t5"]));
        let bytes = encode(&grouped, DEFAULT_COMPRESSION_LEVEL).unwrap();
        assert_eq!(decode(&bytes).unwrap(), grouped);
    }

    #[test]
    fn round_trips_empty_map() {
        let grouped = GroupedMap::new();
        let bytes = encode(&grouped, DEFAULT_COMPRESSION_LEVEL).unwrap();
        assert_eq!(decode(&bytes).unwrap(), grouped);
    }

    #[test]
    fn level_zero_still_round_trips() {
        let grouped = map_shard(&load_adjacency(["1\t2"]));
        let bytes = encode(&grouped, 0).unwrap();
        assert_eq!(decode(&bytes).unwrap(), grouped);
    }

    #[test]
    fn truncated_blob_is_a_decode_error() {
        let grouped = map_shard(&load_adjacency(["1\t2,3"]));
        let bytes = encode(&grouped, DEFAULT_COMPRESSION_LEVEL).unwrap();
        assert!(decode(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn corrupted_blob_is_a_decode_error() {
        let grouped = map_shard(&load_adjacency(["1\t2,3"]));
        let mut bytes = encode(&grouped, DEFAULT_COMPRESSION_LEVEL).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xff;
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(decode(b"not a blob").is_err());
        assert!(decode(b"").is_err());
    }
}

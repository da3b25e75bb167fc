use crate::codec::CodecError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Conditions the aggregator must report distinctly rather than conflate or
/// stall on.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The barrier deadline elapsed before every shard published its marker.
    #[error("barrier timed out after {waited:?}; missing shards: {missing:?}")]
    ShardTimeout { waited: Duration, missing: Vec<usize> },

    /// A published blob failed to decode. Distinct from not-yet-ready: the
    /// completion marker was present, so the blob should have been whole.
    #[error("corrupt blob for shard {shard} at {path}")]
    CorruptBlob {
        shard: usize,
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// A semantically invalid entry reached the merge. Fatal; there is no
    /// recoverable path through merge/reduce.
    #[error("corrupt intermediate data: {0}")]
    CorruptIntermediateData(String),

    #[error("reading blob for shard {shard} at {path}")]
    BlobIo {
        shard: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

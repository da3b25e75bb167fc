pub mod blob;
pub mod codec;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod graph;
pub mod io;
pub mod map;
pub mod merge;
pub mod partition;
pub mod pipeline;
pub mod reduce;
pub mod stats;
pub mod writer;

pub use config::JobConfig;
pub use error::PipelineError;
pub use map::{GroupedMap, TaggedValue};
pub use pipeline::{run_aggregator, run_local, run_mapper};
pub use reduce::RecommendationMap;

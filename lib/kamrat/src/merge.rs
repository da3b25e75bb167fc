use crate::error::PipelineError;
use crate::map::{GroupedMap, TaggedValue};

/// Folds per-shard grouped maps into one, unioning values per key.
/// Deduplication is by full tagged-value equality, so the same (key, tag,
/// payload) triple contributed by two shards is counted once downstream.
pub fn merge_grouped<I>(maps: I) -> Result<GroupedMap, PipelineError>
where
    I: IntoIterator<Item = GroupedMap>,
{
    let mut merged = GroupedMap::new();
    for map in maps {
        for (key, values) in map {
            for value in &values {
                validate(&key, value)?;
            }
            merged.entry(key).or_default().extend(values);
        }
    }
    Ok(merged)
}

fn validate(key: &str, value: &TaggedValue) -> Result<(), PipelineError> {
    match value {
        TaggedValue::Direct(friend) if friend.is_empty() => {
            Err(PipelineError::CorruptIntermediateData(format!(
                "empty direct friend id under key {key:?}"
            )))
        }
        TaggedValue::Fof(candidates) if candidates.is_empty() => {
            Err(PipelineError::CorruptIntermediateData(format!(
                "empty friend-of-friend candidate set under key {key:?}"
            )))
        }
        _ => Ok(()),
    }
}

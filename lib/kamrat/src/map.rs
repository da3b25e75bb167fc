use crate::graph::{AdjacencyRecord, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One tagged shuffle value. The `Fof` payload is canonical at emission time
/// (sorted, deduplicated), so the derived `Eq`/`Hash` cover the full tagged
/// payload and identical candidate sets collapse to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaggedValue {
    Direct(UserId),
    Fof(Vec<UserId>),
}

/// Per-key-deduplicated result of the shuffle step.
pub type GroupedMap = HashMap<UserId, HashSet<TaggedValue>>;

/// Maps one shard's adjacency record and shuffles the emitted pairs into a
/// grouped map. For every `(user, friends)`:
/// - each friend `f` yields `(user, Direct(f))` and `(f, Direct(user))`;
/// - each friend `f` whose co-friends `friends - {f}` are non-empty yields
///   `(f, Fof(friends - {f}))`.
/// Pure and deterministic; shards share nothing.
pub fn map_shard(graph: &AdjacencyRecord) -> GroupedMap {
    let mut grouped = GroupedMap::new();
    let mut emit = |key: &UserId, value: TaggedValue| {
        grouped.entry(key.clone()).or_default().insert(value);
    };
    for (user, friends) in graph {
        for f in friends {
            emit(user, TaggedValue::Direct(f.clone()));
            emit(f, TaggedValue::Direct(user.clone()));
        }
        for f in friends {
            // BTreeSet iteration keeps the candidate payload sorted.
            let candidates: Vec<UserId> = friends.iter().filter(|c| *c != f).cloned().collect();
            if !candidates.is_empty() {
                emit(f, TaggedValue::Fof(candidates));
            }
        }
    }
    grouped
}

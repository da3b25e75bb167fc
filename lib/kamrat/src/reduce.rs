use crate::graph::UserId;
use crate::map::{GroupedMap, TaggedValue};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Per-user ordered recommendation lists (at most N each, possibly empty).
pub type RecommendationMap = HashMap<UserId, Vec<UserId>>;

/// Ranking of candidate ids on equal mutual counts: numeric ids order by
/// value and come before non-numeric ids, which fall back to lexicographic
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IdRank<'a> {
    Numeric(u64),
    Text(&'a str),
}

impl<'a> IdRank<'a> {
    fn of(id: &'a str) -> Self {
        id.parse::<u64>().map_or(IdRank::Text(id), IdRank::Numeric)
    }
}

impl Ord for IdRank<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (IdRank::Numeric(a), IdRank::Numeric(b)) => a.cmp(b),
            (IdRank::Numeric(_), IdRank::Text(_)) => Ordering::Less,
            (IdRank::Text(_), IdRank::Numeric(_)) => Ordering::Greater,
            (IdRank::Text(a), IdRank::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for IdRank<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes top-`n` recommendations per user from the merged grouped map.
/// A candidate's mutual count is the number of friend-of-friend payloads it
/// appears in, excluding the user itself and existing direct friends.
/// Every grouped key gets an entry, empty lists included.
pub fn reduce_grouped(grouped: &GroupedMap, n: usize) -> RecommendationMap {
    let mut results = RecommendationMap::with_capacity(grouped.len());
    for (user, values) in grouped {
        let mut direct: HashSet<&UserId> = HashSet::new();
        let mut fof_lists: Vec<&Vec<UserId>> = Vec::new();
        for value in values {
            match value {
                TaggedValue::Direct(friend) => {
                    direct.insert(friend);
                }
                TaggedValue::Fof(candidates) => fof_lists.push(candidates),
            }
        }

        let mut mutual_counts: HashMap<&UserId, u64> = HashMap::new();
        for candidates in fof_lists {
            for candidate in candidates {
                if candidate != user && !direct.contains(candidate) {
                    *mutual_counts.entry(candidate).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&UserId, u64)> = mutual_counts.into_iter().collect();
        ranked.sort_unstable_by(|(a, count_a), (b, count_b)| {
            count_b
                .cmp(count_a)
                .then_with(|| IdRank::of(a.as_str()).cmp(&IdRank::of(b.as_str())))
        });
        ranked.truncate(n);
        results.insert(
            user.clone(),
            ranked.into_iter().map(|(id, _)| id.clone()).collect(),
        );
    }
    results
}

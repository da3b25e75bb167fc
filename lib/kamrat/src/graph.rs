use std::collections::{BTreeSet, HashMap};
use tracing::warn;

pub type UserId = String;

/// Adjacency record: one user's declared friends, insertion order irrelevant.
/// `BTreeSet` keeps friend iteration in a canonical order, which the mapper
/// relies on when building friend-of-friend candidate payloads.
pub type AdjacencyRecord = HashMap<UserId, BTreeSet<UserId>>;

/// Parses adjacency-list lines into a graph. A line is either a bare id
/// (friendless user) or `id<ws>friend1,friend2,...`. Malformed lines are
/// logged and skipped; loading never aborts. A repeated user id keeps the
/// last line seen.
pub fn load_adjacency<I, S>(lines: I) -> AdjacencyRecord
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut graph = AdjacencyRecord::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(user), None, _) => {
                graph.insert(user.to_string(), BTreeSet::new());
            }
            (Some(user), Some(friends), None) => {
                let friends = friends
                    .split(',')
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect();
                graph.insert(user.to_string(), friends);
            }
            _ => warn!(line = idx + 1, content = line, "skipping malformed adjacency line"),
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_with_friends() {
        let graph = load_adjacency(["0\t1,2", "1\t0"]);
        assert_eq!(graph.len(), 2);
        let friends: Vec<&str> = graph["0"].iter().map(String::as_str).collect();
        assert_eq!(friends, ["1", "2"]);
        assert_eq!(graph["1"].len(), 1);
    }

    #[test]
    fn bare_id_registers_friendless_user() {
        let graph = load_adjacency(["42"]);
        assert!(graph["42"].is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let graph = load_adjacency(["", "a b c", "1\t2", "   "]);
        assert_eq!(graph.len(), 1);
        assert!(graph.contains_key("1"));
    }

    #[test]
    fn repeated_user_keeps_last_line() {
        let graph = load_adjacency(["7\t1", "7\t2,3"]);
        assert_eq!(graph["7"].len(), 2);
        assert!(graph["7"].contains("2"));
    }

    #[test]
    fn space_separator_also_accepted() {
        let graph = load_adjacency(["5 6,7"]);
        assert_eq!(graph["5"].len(), 2);
    }
}

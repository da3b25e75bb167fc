/// Splits input lines into exactly `m` contiguous shards of `ceil(n/m)` lines
/// each, in original order. Trailing shards may be empty when `m` exceeds the
/// number of chunks needed; a shard is never silently absent.
pub fn split_lines(mut lines: Vec<String>, m: usize) -> Vec<Vec<String>> {
    assert!(m > 0, "shard count must be positive");
    let n = lines.len();
    let chunk = ((n + m - 1) / m).max(1);
    let mut shards = Vec::with_capacity(m);
    for _ in 0..m {
        let take = chunk.min(lines.len());
        let rest = lines.split_off(take);
        shards.push(std::mem::replace(&mut lines, rest));
    }
    shards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn union_is_input_exactly_once() {
        let shards = split_lines(input(10), 3);
        assert_eq!(shards.len(), 3);
        let flat: Vec<String> = shards.into_iter().flatten().collect();
        assert_eq!(flat, input(10));
    }

    #[test]
    fn chunks_are_ceil_sized() {
        let shards = split_lines(input(10), 3);
        assert_eq!(shards[0].len(), 4);
        assert_eq!(shards[1].len(), 4);
        assert_eq!(shards[2].len(), 2);
    }

    #[test]
    fn excess_shards_are_empty_but_present() {
        let shards = split_lines(input(2), 5);
        assert_eq!(shards.len(), 5);
        assert_eq!(shards[0].len(), 1);
        assert_eq!(shards[1].len(), 1);
        assert!(shards[2..].iter().all(Vec::is_empty));
    }

    #[test]
    fn empty_input_yields_m_empty_shards() {
        let shards = split_lines(Vec::new(), 4);
        assert_eq!(shards.len(), 4);
        assert!(shards.iter().all(Vec::is_empty));
    }

    #[test]
    fn single_shard_takes_everything() {
        let shards = split_lines(input(7), 1);
        assert_eq!(shards.len(), 1);
        assert_eq!(shards[0].len(), 7);
    }
}

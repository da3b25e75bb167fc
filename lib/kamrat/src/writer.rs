use crate::graph::UserId;
use crate::io::atomic_write;
use crate::reduce::RecommendationMap;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// One line per user with a non-empty recommendation list:
/// `<user>\t<comma-joined candidate ids>`. User iteration order is
/// unspecified. Published via temp-then-rename.
pub fn write_recommendations(path: &Path, recommendations: &RecommendationMap) -> Result<()> {
    let mut out = String::new();
    let mut users = 0usize;
    for (user, recs) in recommendations {
        if recs.is_empty() {
            continue;
        }
        push_line(&mut out, user, recs);
        users += 1;
    }
    atomic_write(path, out.as_bytes())?;
    info!(users, path = %path.display(), "wrote recommendations");
    Ok(())
}

/// Same per-line format restricted to `ids`, emitted in that list's order,
/// omitting ids with no (or empty) recommendations.
pub fn write_selected(
    path: &Path,
    recommendations: &RecommendationMap,
    ids: &[UserId],
) -> Result<()> {
    let mut out = String::new();
    let mut users = 0usize;
    for user in ids {
        match recommendations.get(user) {
            Some(recs) if !recs.is_empty() => {
                push_line(&mut out, user, recs);
                users += 1;
            }
            _ => {}
        }
    }
    atomic_write(path, out.as_bytes())?;
    info!(users, selected = ids.len(), path = %path.display(), "wrote selected recommendations");
    Ok(())
}

fn push_line(out: &mut String, user: &str, recs: &[UserId]) {
    out.push_str(user);
    out.push('\t');
    out.push_str(&recs.join(","));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> RecommendationMap {
        let mut recs = RecommendationMap::new();
        recs.insert("1".into(), vec!["3".into(), "4".into()]);
        recs.insert("2".into(), Vec::new());
        recs
    }

    #[test]
    fn skips_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recommendations.txt");
        write_recommendations(&path, &sample()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\t3,4\n");
    }

    #[test]
    fn selected_follows_given_order_and_omits_missing() {
        let mut recs = sample();
        recs.insert("9".into(), vec!["1".into()]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selected.txt");
        let ids = ["9".to_string(), "2".to_string(), "1".to_string(), "404".to_string()];
        write_selected(&path, &recs, &ids).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "9\t1\n1\t3,4\n");
    }
}

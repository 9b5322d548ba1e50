use crate::error::Result;
use crate::model::{FileCounts, FileStat};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical artifact encoding: a JSON array of `[path, counts]` pairs
/// in ranked order. An array of pairs rather than a keyed object, so
/// that paths can never collide with reserved keys and the order is
/// explicit in the document instead of depending on key iteration.
pub fn serialize(report: &[FileStat]) -> Result<String> {
    let pairs: Vec<(&str, FileCounts)> = report
        .iter()
        .map(|stat| (stat.path.as_str(), FileCounts::from(stat)))
        .collect();
    Ok(serde_json::to_string(&pairs)?)
}

/// Inverse of [`serialize`], used by the serving path's HTML branch.
pub fn deserialize(bytes: &[u8]) -> Result<Vec<FileStat>> {
    let pairs: Vec<(String, FileCounts)> = serde_json::from_slice(bytes)?;
    Ok(pairs
        .into_iter()
        .map(|(path, counts)| FileStat {
            path,
            additions: counts.additions,
            deletions: counts.deletions,
            commit_count: counts.commit_count,
        })
        .collect())
}

/// Deterministic artifact name: run timestamp, repo identifier, window,
/// branch. Branch names may contain `/`, which must not become path
/// separators here.
pub fn artifact_name(now: DateTime<Utc>, repo: &str, days: u32, branch: &str) -> String {
    format!(
        "{}-{}-{}-{}.json",
        now.format("%Y-%m-%d-%H-%M"),
        repo,
        days,
        branch.replace(['/', '\\'], "-")
    )
}

/// Persist the ranked report under `dir`, creating the directory if
/// needed, and return the artifact path. Write-once; nothing reads it
/// back except the preview server.
pub fn write_report(
    dir: &Path,
    report: &[FileStat],
    repo: &str,
    days: u32,
    branch: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(artifact_name(now, repo, days, branch));
    fs::write(&path, serialize(report)?)?;
    Ok(path)
}

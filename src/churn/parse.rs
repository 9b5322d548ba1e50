use crate::model::ChangeLine;

/// Filenames never counted as real source files: lockfiles, changelogs,
/// and the empty path produced by trailing newlines.
pub const EXCLUDED_FILES: &[&str] = &[
    "package-lock.json",
    "package.json",
    "yarn.lock",
    "CHANGELOG.md",
    "composer.lock",
    "yarn-error.log",
    "pnpm-lock.yaml",
    "",
];

pub fn is_excluded(path: &str) -> bool {
    EXCLUDED_FILES.contains(&path)
}

/// Parse raw `git log --pretty=format: --numstat` output into change
/// records, preserving input order.
///
/// Blank lines are commit boundaries, not malformed records; they are
/// dropped silently. On each remaining line the last tab-separated
/// field is the path and the first two are additions/deletions. A stat
/// field that does not parse as a non-negative integer (git's `-`
/// marker for binary files) becomes `None` and counts as zero churn
/// downstream.
pub fn parse(raw: &str) -> Vec<ChangeLine> {
    raw.lines()
        .filter_map(parse_line)
        .filter(|line| !is_excluded(&line.path))
        .collect()
}

fn parse_line(line: &str) -> Option<ChangeLine> {
    if line.trim().is_empty() {
        return None;
    }
    let mut fields = line.split('\t');
    let additions = fields.next().and_then(|f| f.parse::<u64>().ok());
    let deletions = fields.next().and_then(|f| f.parse::<u64>().ok());
    let path = line.split('\t').next_back().unwrap_or("").to_string();
    Some(ChangeLine {
        additions,
        deletions,
        path,
    })
}

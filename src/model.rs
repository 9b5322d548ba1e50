use serde::{Deserialize, Serialize};

/// One numstat record: what one commit did to one file.
///
/// `None` counts come from git's `-` marker on binary files; they still
/// count as a touch but contribute zero churn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLine {
    pub additions: Option<u64>,
    pub deletions: Option<u64>,
    pub path: String,
}

/// Aggregated per-file result for one run. Immutable once aggregation
/// is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub path: String,
    pub additions: u64,
    pub deletions: u64,
    pub commit_count: u32,
}

impl FileStat {
    pub fn new(path: String) -> Self {
        Self {
            path,
            additions: 0,
            deletions: 0,
            commit_count: 0,
        }
    }

    pub fn record(&mut self, line: &ChangeLine) {
        self.additions += line.additions.unwrap_or(0);
        self.deletions += line.deletions.unwrap_or(0);
        self.commit_count += 1;
    }

    pub fn churn(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// Wire shape of the per-file counts inside the persisted artifact.
/// Keys are camelCase; the artifact is an array of `[path, counts]`
/// pairs so path names can never collide with object keys and the
/// ranking order survives serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCounts {
    pub additions: u64,
    pub deletions: u64,
    pub commit_count: u32,
}

impl From<&FileStat> for FileCounts {
    fn from(stat: &FileStat) -> Self {
        Self {
            additions: stat.additions,
            deletions: stat.deletions,
            commit_count: stat.commit_count,
        }
    }
}

use crate::error::{ChurnError, Result};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Clone `location` at `branch` into a scratch directory and return the
/// raw numstat log for the last `window_days` days.
///
/// The scratch directory is a `TempDir`, so it is removed when this
/// function returns, on success and on every error path alike. This is
/// the only side-effecting stage of the pipeline; everything downstream
/// is a pure function of the returned text.
pub fn fetch_history(location: &str, branch: &str, window_days: u32) -> Result<String> {
    let scratch = TempDir::new().map_err(|e| {
        ChurnError::fetch("failed to create scratch directory", e.to_string())
    })?;
    clone_branch(location, branch, scratch.path())?;
    numstat_log(scratch.path(), window_days)
}

/// The repository identifier used in artifact names: the last path
/// segment of the location, with a trailing `.git` stripped.
pub fn repo_name(location: &str) -> String {
    let trimmed = location.trim_end_matches('/');
    let name = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    name.strip_suffix(".git").unwrap_or(name).to_string()
}

fn clone_branch(location: &str, branch: &str, dest: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(["clone", "--single-branch", "--branch", branch])
        .arg(location)
        .arg(dest)
        .output()
        .map_err(|e| ChurnError::fetch("failed to run git clone", e.to_string()))?;

    if !output.status.success() {
        return Err(ChurnError::fetch(
            format!("git clone of {location} (branch {branch}) failed"),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(())
}

fn numstat_log(repo_dir: &Path, window_days: u32) -> Result<String> {
    let output = Command::new("git")
        .args(["log", "--pretty=format:", "--numstat"])
        .arg(format!("--since={window_days} days ago"))
        .current_dir(repo_dir)
        .output()
        .map_err(|e| ChurnError::fetch("failed to run git log", e.to_string()))?;

    if !output.status.success() {
        return Err(ChurnError::fetch(
            "git log --numstat failed",
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_name_strips_git_suffix() {
        assert_eq!(repo_name("https://example.com/acme/widgets.git"), "widgets");
        assert_eq!(repo_name("https://example.com/acme/widgets"), "widgets");
    }

    #[test]
    fn repo_name_handles_ssh_and_local_paths() {
        assert_eq!(repo_name("git@example.com:acme/widgets.git"), "widgets");
        assert_eq!(repo_name("/home/dev/repos/widgets"), "widgets");
        assert_eq!(repo_name("/home/dev/repos/widgets/"), "widgets");
    }

    #[test]
    fn clone_of_unreachable_location_is_a_fetch_error() {
        let scratch = TempDir::new().unwrap();
        let err = clone_branch(
            "/nonexistent/definitely-not-a-repo",
            "main",
            &scratch.path().join("dest"),
        )
        .unwrap_err();
        assert!(matches!(err, ChurnError::Fetch { .. }));
    }
}

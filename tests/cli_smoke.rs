use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn init_git_repo(dir: &Path) {
    // init on a known branch name and basic identity
    assert!(Command::new("git")
        .args(["init"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["checkout", "-b", "main"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "core.autocrlf", "false"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.email", "you@example.com"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.name", "Your Name"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    assert!(Command::new("git")
        .args(["add", "."])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["commit", "-m", &format!("add {name}")])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn run_analysis(repo: &Path, out: &Path) -> std::process::Output {
    let mut cmd = Command::cargo_bin("churnscope").unwrap();
    cmd.arg(repo)
        .args(["--days", "30", "--branch", "main", "--save"])
        .arg(out);
    cmd.output().unwrap()
}

fn single_artifact(out: &Path) -> serde_json::Value {
    let mut entries: Vec<_> = fs::read_dir(out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one artifact in {out:?}");
    let artifact = entries.pop().unwrap();
    assert!(artifact
        .file_name()
        .unwrap()
        .to_string_lossy()
        .ends_with(".json"));
    serde_json::from_slice(&fs::read(artifact).unwrap()).unwrap()
}

#[test]
fn save_writes_ranked_artifact() {
    if !has_git() {
        return;
    }
    let repo = tempdir().unwrap();
    let out = tempdir().unwrap();
    init_git_repo(repo.path());
    commit_file(repo.path(), "hot.rs", "fn a() {}\n");
    commit_file(repo.path(), "hot.rs", "fn a() {}\nfn b() {}\n");
    commit_file(repo.path(), "cold.rs", "fn c() {}\n");

    let output = run_analysis(repo.path(), out.path());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let v = single_artifact(out.path());
    let pairs = v.as_array().unwrap();
    assert_eq!(pairs.len(), 2);

    // hot.rs was touched by two commits, so it ranks first
    assert_eq!(pairs[0][0].as_str().unwrap(), "hot.rs");
    assert_eq!(pairs[0][1]["commitCount"].as_u64().unwrap(), 2);
    assert_eq!(pairs[1][0].as_str().unwrap(), "cold.rs");
    assert_eq!(pairs[1][1]["commitCount"].as_u64().unwrap(), 1);
    assert!(pairs[0][1]["additions"].as_u64().unwrap() >= 2);
}

#[test]
fn excluded_files_produce_an_empty_artifact() {
    if !has_git() {
        return;
    }
    let repo = tempdir().unwrap();
    let out = tempdir().unwrap();
    init_git_repo(repo.path());
    commit_file(repo.path(), "package.json", "{\"name\": \"x\"}\n");
    commit_file(repo.path(), "yarn.lock", "# lock\n");

    let output = run_analysis(repo.path(), out.path());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let v = single_artifact(out.path());
    assert_eq!(v.as_array().unwrap().len(), 0);
}

#[test]
fn missing_branch_fails_without_writing_an_artifact() {
    if !has_git() {
        return;
    }
    let repo = tempdir().unwrap();
    let out = tempdir().unwrap();
    init_git_repo(repo.path());
    commit_file(repo.path(), "file.rs", "fn f() {}\n");

    let mut cmd = Command::cargo_bin("churnscope").unwrap();
    cmd.arg(repo.path())
        .args(["--days", "30", "--branch", "no-such-branch", "--save"])
        .arg(out.path());
    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn zero_day_window_is_rejected_before_fetching() {
    let out = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("churnscope").unwrap();
    cmd.arg("/nonexistent/never-touched")
        .args(["--days", "0", "--save"])
        .arg(out.path());
    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn unknown_format_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("churnscope").unwrap();
    cmd.args(["/some/repo", "--format", "xml"]);
    cmd.assert().failure();
}

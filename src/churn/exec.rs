use crate::cli::Cli;
use crate::git;
use crate::model::FileStat;
use crate::report;
use crate::server;
use anyhow::Context;
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Run the whole pipeline: fetch, parse, aggregate, rank, persist, and
/// (unless `--save` was given) serve a preview of the result.
pub fn exec(cli: Cli) -> anyhow::Result<()> {
    cli.validate()?;

    let spinner = clone_spinner(&cli.repo, &cli.branch);
    let raw = git::fetch_history(&cli.repo, &cli.branch, cli.days)
        .context("Failed to fetch repository history")?;
    spinner.finish_and_clear();

    let lines = super::parse(&raw);
    let ranked = super::rank(super::aggregate(&lines));

    let out_dir = cli.save.clone().unwrap_or_else(default_results_dir);
    let artifact = report::write_report(&out_dir, &ranked, &git::repo_name(&cli.repo), cli.days, &cli.branch, Utc::now())
        .context("Failed to write report artifact")?;

    let total_churn: u64 = ranked.iter().map(FileStat::churn).sum();
    println!(
        "{} {} ({} files, total churn {})",
        style("Results saved to").bold(),
        artifact.display(),
        style(ranked.len()).cyan(),
        style(total_churn).cyan()
    );

    if cli.save.is_none() {
        server::serve(&artifact, cli.format, cli.port).context("Preview server failed")?;
    }

    Ok(())
}

fn clone_spinner(repo: &str, branch: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Cloning {repo} (branch {branch})..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn default_results_dir() -> PathBuf {
    std::env::temp_dir().join("churnscope-results")
}

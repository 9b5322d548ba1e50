use crate::error::{ChurnError, Result};
use anyhow::Result as AnyResult;
use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "churnscope")]
#[command(about = "Hotspot view of recent per-file churn in a git repository")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Repository URL or local path")]
    pub repo: String,

    #[arg(long, default_value_t = 30, help = "Lookback window in days")]
    pub days: u32,

    #[arg(long, default_value = "main", help = "Branch to analyze")]
    pub branch: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json, help = "Preview output format")]
    pub format: OutputFormat,

    #[arg(long, help = "Write the artifact into this directory and skip the preview server")]
    pub save: Option<PathBuf>,

    #[arg(long, default_value_t = 9666, help = "First port to try for the preview server")]
    pub port: u16,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
}

impl FromStr for OutputFormat {
    type Err = ChurnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(ChurnError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> AnyResult<()> {
        crate::churn::exec(self)
    }

    /// Shape-only validation, done before the fetch ever starts.
    /// Existence of the repository or branch is the fetcher's problem.
    pub fn validate(&self) -> Result<()> {
        if self.repo.trim().is_empty() {
            return Err(ChurnError::InvalidInput(
                "repository location is empty".to_string(),
            ));
        }
        if self.repo.chars().any(char::is_whitespace) {
            return Err(ChurnError::InvalidInput(format!(
                "repository location contains whitespace: {:?}",
                self.repo
            )));
        }
        if self.days == 0 {
            return Err(ChurnError::InvalidInput(
                "lookback window must be at least one day".to_string(),
            ));
        }
        if self.branch.is_empty() || self.branch.chars().any(char::is_whitespace) {
            return Err(ChurnError::InvalidInput(format!(
                "branch name is not well-formed: {:?}",
                self.branch
            )));
        }
        Ok(())
    }
}

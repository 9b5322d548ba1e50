use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChurnError>;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fetch failed: {context}: {stderr}")]
    Fetch { context: String, stderr: String },
    #[error("Unsupported output format: {0} (expected json or html)")]
    UnsupportedFormat(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChurnError {
    pub fn fetch(context: impl Into<String>, stderr: impl Into<String>) -> Self {
        ChurnError::Fetch {
            context: context.into(),
            stderr: stderr.into(),
        }
    }
}

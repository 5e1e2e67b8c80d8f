use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog request failed: {0}")]
    Fetch(String),

    #[error("catalog HTTP {status}")]
    Http { status: u16 },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog document is null")]
    Malformed,
}

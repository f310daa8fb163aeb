use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A CSS selector in the profile does not parse.
    #[error("invalid selector for {field}: `{selector}` ({reason})")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    /// A required field had no matching element inside a container.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("failed to read selector profile {path}: {source}")]
    SelectorFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed selector profile {path}: {source}")]
    SelectorJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

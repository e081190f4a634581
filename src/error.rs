//! Error taxonomy for the headline pipeline.
//!
//! Only configuration, summarizer and store errors ever reach a caller. Fetch
//! errors are produced per source and absorbed by [`crate::news::News`].

use serde::Serialize;
use thiserror::Error;

use crate::models::Source;

pub type Result<T> = std::result::Result<T, NewsError>;

#[derive(Debug, Error)]
pub enum NewsError {
    /// Invalid caller-supplied configuration (top-N counts, API key, paths).
    #[error("configuration error: {0}")]
    Config(String),

    #[error("fetch failed for {outlet}: {message}")]
    Fetch { outlet: Source, message: String },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("summarization failed: {0}")]
    Summarize(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The structured body printed for any failure that reaches the user.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&NewsError> for ErrorBody {
    fn from(err: &NewsError) -> Self {
        ErrorBody {
            error: err.to_string(),
        }
    }
}

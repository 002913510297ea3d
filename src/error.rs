// src/error.rs
// =============================================================================
// Error types for the scraping pipeline.
//
// main.rs still uses anyhow::Result at the very top (it only needs to print
// the error), but everything below it returns ScrapeError so callers can
// tell a network failure apart from a GitHub error response or a failed
// CSV write.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The request never produced a response (timeout, DNS, refused, ...)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// GitHub answered, but not with what we asked for
    #[error("GitHub API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

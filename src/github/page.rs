// src/github/page.rs
// =============================================================================
// What one pagination step produced.
//
// A page request can end four ways, and they must not be confused: an empty
// page means "done", while a GitHub error or a dropped connection means "we
// do not know". Collapsing the latter into the former silently truncates the
// export.
// =============================================================================

use super::client::FetchError;
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Debug)]
pub enum PageOutcome {
    /// A non-empty page; there may be more after it
    More(Vec<Value>),
    /// No more items (empty page, or a page limit was reached)
    Exhausted,
    /// The request itself failed
    TransportError(reqwest::Error),
    /// GitHub answered with an error, or with a body of the wrong shape
    ApiError { status: StatusCode, message: String },
}

impl PageOutcome {
    /// `Ok(Some(items))` to keep going, `Ok(None)` when done, `Err` on failure.
    ///
    /// Lets a caller drain a paginator with `while let Some(items) = ...?`.
    pub fn into_result(self) -> Result<Option<Vec<Value>>, FetchError> {
        match self {
            PageOutcome::More(items) => Ok(Some(items)),
            PageOutcome::Exhausted => Ok(None),
            PageOutcome::TransportError(e) => Err(FetchError::Transport(e)),
            PageOutcome::ApiError { status, message } => Err(FetchError::Api { status, message }),
        }
    }
}

impl From<FetchError> for PageOutcome {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(e) => PageOutcome::TransportError(e),
            FetchError::Api { status, message } => PageOutcome::ApiError { status, message },
        }
    }
}

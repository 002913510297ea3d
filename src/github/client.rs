// src/github/client.rs
// =============================================================================
// A thin GitHub REST client.
//
// What it does:
// - Builds one reqwest Client with the headers every request needs
//   (User-Agent, Accept, and `Authorization: token <value>` when we have one)
// - Issues GET requests and hands back the decoded JSON body
// - Turns anything that is not a 2xx JSON response into a FetchError
//
// The paginators (search.rs, repos.rs) decide what a body *means*; this
// file only knows how to get one.
//
// Rust concepts:
// - Builder pattern: Client::builder() configures the client step by step
// - serde_json::Value: Untyped JSON, read later through safe accessors
// =============================================================================

use crate::config::Config;
use crate::error::ScrapeError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT_VALUE: &str = concat!("gh-locale-scraper/", env!("CARGO_PKG_VERSION"));

/// Why a single request did not produce usable JSON
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

impl From<FetchError> for ScrapeError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(e) => ScrapeError::Transport(e),
            FetchError::Api { status, message } => ScrapeError::Api { status, message },
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base: Url,
}

impl GitHubClient {
    /// Builds the client. The token is baked into the default headers here,
    /// so it is sent on every request without anyone else touching it.
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        match &config.token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("token {}", token.trim()))
                    .map_err(|e| ScrapeError::Config(format!("Invalid GitHub token: {}", e)))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                warn!("No GitHub token configured, requests are unauthenticated and heavily rate limited");
            }
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base: config.api_base.clone(),
        })
    }

    /// Appends path segments to the API base URL.
    ///
    /// Segments are percent-encoded individually, so a login can never
    /// escape its place in the path.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Config only accepts http(s) URLs, which can always be a base
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // GETs an API endpoint and decodes the body as JSON
    //
    // Parameters:
    //   segments: path below the API base, e.g. ["users", "octocat", "repos"]
    //   query: query-string pairs (page, per_page, ...)
    //
    // Returns: the JSON body of a 2xx response
    //   Error: FetchError::Transport if no response arrived (including the
    //          configured timeout), FetchError::Api for any non-2xx status or
    //          a body that is not JSON
    pub async fn get_json(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        let url = self.endpoint(segments);
        debug!(%url, ?query, "GET");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status,
                message: error_message(status, &body),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Api {
            status,
            message: format!("response body is not valid JSON: {}", e),
        })
    }

    /// Full profile for one login (`GET /users/<login>`)
    pub async fn fetch_user(&self, login: &str) -> Result<Value, FetchError> {
        let profile = self.get_json(&["users", login], &[]).await?;
        if !profile.is_object() {
            return Err(FetchError::Api {
                status: StatusCode::OK,
                message: format!("unexpected response shape for user '{}'", login),
            });
        }
        Ok(profile)
    }
}

// Picks a readable message out of an error response
//
// GitHub error bodies look like {"message": "...", "documentation_url": "..."}.
// Anything else is shown trimmed to 200 characters, and an empty body falls
// back to the status text ("Bad Gateway").
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().chars().take(200).collect(),
        None => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why default_headers instead of adding headers per request?
//    - The client is built once and reused for every request
//    - Putting the token in the defaults means no request can forget it
//
// 2. What does set_sensitive(true) do?
//    - Marks the header value as secret, so Debug output prints it as
//      "Sensitive" instead of leaking the token into logs
//
// 3. Why two error enums (FetchError here, ScrapeError in error.rs)?
//    - FetchError only has the two ways a request can fail, which maps
//      exactly onto PageOutcome's two error variants
//    - ScrapeError also covers config and CSV problems; `impl From` lets
//      `?` convert one into the other
//
// 4. What is path_segments_mut()?
//    - A url-crate API that edits the path one segment at a time
//    - Each segment is percent-encoded, so "a/b" stays one segment
// -----------------------------------------------------------------------------

// src/github/search.rs
// =============================================================================
// Paginates GET /search/users.
//
// How it works:
// 1. Request page 1 with `q=location:<loc> followers:<filter>`, 30 per page
// 2. A page with items -> PageOutcome::More, and the page counter advances
// 3. A page whose `items` is missing or empty -> PageOutcome::Exhausted
// 4. Errors are reported as such, never as "no more results"
//
// GitHub only serves the first 1000 results of a search; asking past that
// returns a 422, so we stop on our own once we reach it. If `total_count`
// says there were more matches than we got, the search is marked truncated
// and the caller decides what to tell the user.
// =============================================================================

use super::client::{FetchError, GitHubClient};
use super::page::PageOutcome;
use serde_json::Value;
use tracing::{debug, warn};

pub const SEARCH_PER_PAGE: u32 = 30;
pub const SEARCH_RESULT_LIMIT: u32 = 1000;

/// Everything a drained search produced
#[derive(Debug)]
pub struct SearchResults {
    pub users: Vec<Value>,
    /// `total_count` of the last page GitHub sent, if it had one
    pub total_count: Option<u64>,
    /// Stopped at the 1000-result ceiling with matches left over
    pub truncated: bool,
}

pub struct UserSearch<'a> {
    client: &'a GitHubClient,
    query: String,
    page: u32,
    fetched: u64,
    total_count: Option<u64>,
    truncated: bool,
    done: bool,
}

impl<'a> UserSearch<'a> {
    pub fn new(client: &'a GitHubClient, query: impl Into<String>) -> Self {
        Self {
            client,
            query: query.into(),
            page: 1,
            fetched: 0,
            total_count: None,
            truncated: false,
            done: false,
        }
    }

    /// True once the paginator gave up at the result ceiling while
    /// `total_count` (or its absence) says more users matched
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Fetches the next page. Once anything other than `More` has been
    /// returned, later calls return `Exhausted` without touching the network.
    pub async fn next_page(&mut self) -> PageOutcome {
        if self.done {
            return PageOutcome::Exhausted;
        }
        if (self.page - 1) * SEARCH_PER_PAGE >= SEARCH_RESULT_LIMIT {
            self.done = true;
            // Without a total_count we cannot prove we got everything
            self.truncated = self.total_count.map_or(true, |total| total > self.fetched);
            if self.truncated {
                warn!(
                    fetched = self.fetched,
                    total_count = ?self.total_count,
                    "Search stopped at GitHub's {}-result limit, remaining users are not exported",
                    SEARCH_RESULT_LIMIT
                );
            }
            return PageOutcome::Exhausted;
        }

        let params = [
            ("q", self.query.clone()),
            ("per_page", SEARCH_PER_PAGE.to_string()),
            ("page", self.page.to_string()),
        ];

        let outcome = match self.client.get_json(&["search", "users"], &params).await {
            Ok(body) => {
                let (outcome, total_count) = items_of(body);
                if total_count.is_some() {
                    self.total_count = total_count;
                }
                outcome
            }
            Err(e) => PageOutcome::from(e),
        };

        match &outcome {
            PageOutcome::More(items) => {
                debug!(page = self.page, count = items.len(), "Fetched search page");
                self.fetched += items.len() as u64;
                self.page += 1;
            }
            _ => self.done = true,
        }
        outcome
    }

    /// Drains every page, in order
    pub async fn collect_all(mut self) -> Result<SearchResults, FetchError> {
        let mut users = Vec::new();
        while let Some(items) = self.next_page().await.into_result()? {
            users.extend(items);
        }
        Ok(SearchResults {
            users,
            total_count: self.total_count,
            truncated: self.truncated,
        })
    }
}

// Splits a search body into the page outcome and its `total_count`
fn items_of(body: Value) -> (PageOutcome, Option<u64>) {
    match body {
        Value::Object(mut map) => {
            let total_count = map.get("total_count").and_then(Value::as_u64);
            let outcome = match map.remove("items") {
                Some(Value::Array(items)) if !items.is_empty() => PageOutcome::More(items),
                _ => PageOutcome::Exhausted,
            };
            (outcome, total_count)
        }
        _ => (PageOutcome::Exhausted, None),
    }
}

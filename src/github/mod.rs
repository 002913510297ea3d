// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Submodules:
// - client: HTTP client with auth headers, JSON GETs, profile lookups
// - page: PageOutcome, the result of one pagination step
// - search: Paginator over /search/users
// - repos: Paginator over /users/<login>/repos
//
// Everything here returns raw serde_json::Value items; turning them into
// rows is the export module's job.
// =============================================================================

mod client;
mod page;
mod repos;
mod search;

pub use client::GitHubClient;
pub use repos::{RepoListing, REPOS_PER_PAGE};
pub use search::UserSearch;

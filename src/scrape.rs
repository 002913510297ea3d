// src/scrape.rs
// =============================================================================
// Runs one scrape from start to finish.
//
// What happens here:
// 1. Page through the user search until it is exhausted
// 2. Optionally swap each search summary for the user's full profile
// 3. Write users.csv
// 4. For each user, in search order, page through their repositories
// 5. Write repositories.csv
//
// Everything is sequential: one request in flight at a time.
//
// Failure policy:
// - A failed search aborts before anything is written, since a partial user
//   list would look like a complete one
// - A search cut off at GitHub's 1000-result ceiling is exported, but the
//   summary says so (RunSummary::search_truncated)
// - A failed repository listing only loses that user's repositories; the
//   user is reported in RunSummary::skipped_users
// - A failed profile lookup keeps the search summary for that user
// =============================================================================

use crate::config::Config;
use crate::error::Result;
use crate::export::{write_csv, RepositoryRecord, UserRecord};
use crate::github::{GitHubClient, RepoListing, UserSearch};
use serde_json::Value;
use tracing::{info, warn};

/// A user whose repositories could not be listed
#[derive(Debug, Clone)]
pub struct SkippedUser {
    pub login: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub users_written: usize,
    pub repositories_written: usize,
    pub skipped_users: Vec<SkippedUser>,
    /// Repositories dropped because they had no full_name
    pub skipped_repositories: usize,
    /// The search matched more users than GitHub lets us page through
    pub search_truncated: bool,
    /// What GitHub reported as the number of matching users
    pub search_total_count: Option<u64>,
}

impl RunSummary {
    /// True when nothing the search matched was left out of the files
    pub fn is_complete(&self) -> bool {
        self.skipped_users.is_empty() && !self.search_truncated
    }
}

// Runs the whole scrape described by `config`
//
// Parameters:
//   config: validated settings (query, token, output directory, limits)
//
// Returns: RunSummary with counts and anything that was skipped
//   Error: if the search fails or a CSV file cannot be written
pub async fn run(config: &Config) -> Result<RunSummary> {
    let client = GitHubClient::new(config)?;
    let mut summary = RunSummary::default();

    let query = config.search_query();
    info!(%query, "Searching users");
    let search = UserSearch::new(&client, query).collect_all().await?;
    info!(count = search.users.len(), total_count = ?search.total_count, "Fetched users");
    summary.search_truncated = search.truncated;
    summary.search_total_count = search.total_count;

    let mut raw_users = search.users;
    if config.enrich_profiles {
        enrich_profiles(&client, &mut raw_users).await;
    }

    let users: Vec<UserRecord> = raw_users.iter().map(UserRecord::from_json).collect();
    write_csv(&config.users_path(), &users)?;
    summary.users_written = users.len();

    let repositories =
        collect_repositories(&client, &users, config.max_repo_pages, &mut summary).await;
    write_csv(&config.repositories_path(), &repositories)?;
    summary.repositories_written = repositories.len();

    Ok(summary)
}

// Lists every user's repositories, one user after another
//
// Parameters:
//   client: the GitHub client shared by the whole run
//   users: normalized users, in search order
//   max_pages: page cap per user (100 repositories per page)
//   summary: receives skipped users and unidentifiable repositories
//
// Returns: all repository records, grouped by user in search order
//
// Never fails: a user whose listing breaks is recorded and skipped.
async fn collect_repositories(
    client: &GitHubClient,
    users: &[UserRecord],
    max_pages: u32,
    summary: &mut RunSummary,
) -> Vec<RepositoryRecord> {
    let mut repositories = Vec::new();

    for (index, user) in users.iter().enumerate() {
        if user.login.is_empty() {
            warn!(index, "Search result without a login, skipping its repositories");
            summary.skipped_users.push(SkippedUser {
                login: String::new(),
                reason: format!("search result #{} has no login", index + 1),
            });
            continue;
        }

        let listing = RepoListing::new(client, user.login.as_str(), max_pages);
        match listing.collect_all().await {
            Ok(raw_repos) => {
                info!(
                    login = %user.login,
                    count = raw_repos.len(),
                    user = index + 1,
                    of = users.len(),
                    "Fetched repositories"
                );
                for raw in &raw_repos {
                    match RepositoryRecord::from_json(raw, &user.login) {
                        Some(record) => repositories.push(record),
                        None => {
                            warn!(login = %user.login, "Repository without full_name, skipping it");
                            summary.skipped_repositories += 1;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(login = %user.login, error = %e, "Could not list repositories, skipping user");
                summary.skipped_users.push(SkippedUser {
                    login: user.login.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    repositories
}

// Replaces each search summary with the full /users/<login> profile
//
// Items without a login are left alone. A failed lookup keeps the summary,
// so the worst case is the same row a plain run would have written.
async fn enrich_profiles(client: &GitHubClient, users: &mut [Value]) {
    let total = users.len();
    for (index, user) in users.iter_mut().enumerate() {
        let login = match user.get("login").and_then(Value::as_str) {
            Some(login) => login.to_string(),
            None => continue,
        };

        match client.fetch_user(&login).await {
            Ok(profile) => {
                info!(%login, user = index + 1, of = total, "Fetched profile");
                *user = profile;
            }
            Err(e) => {
                warn!(%login, error = %e, "Could not fetch profile, keeping search summary");
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is `run` async if nothing runs concurrently?
//    - reqwest's client is async, so every request is a future
//    - We .await each one before starting the next, which keeps the order
//      of requests (and of rows in the CSV files) exactly the search order
//
// 2. What does `&mut RunSummary` buy us?
//    - collect_repositories can record skipped users without returning a
//      tuple, and the borrow checker guarantees nobody else touches the
//      summary meanwhile
//
// 3. Why `match` on the listing result instead of `?`
//    - `?` would abort the whole run on the first broken user
//    - Matching lets us log the error, note the user, and keep going
//
// 4. What is `*user = profile`?
//    - `user` is a `&mut Value` pointing into the vector
//    - Assigning through the dereference replaces the element in place
// -----------------------------------------------------------------------------

// src/github/repos.rs
// =============================================================================
// Paginates GET /users/<login>/repos, most recently pushed first.
//
// Stops on the first empty page, or after `max_pages` pages even if GitHub
// has more. With the default of 5 pages that is at most 500 repositories
// per user.
// =============================================================================

use super::client::{FetchError, GitHubClient};
use super::page::PageOutcome;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

pub const REPOS_PER_PAGE: u32 = 100;

pub struct RepoListing<'a> {
    client: &'a GitHubClient,
    login: String,
    page: u32,
    max_pages: u32,
    done: bool,
}

impl<'a> RepoListing<'a> {
    pub fn new(client: &'a GitHubClient, login: impl Into<String>, max_pages: u32) -> Self {
        Self {
            client,
            login: login.into(),
            page: 1,
            max_pages,
            done: false,
        }
    }

    pub async fn next_page(&mut self) -> PageOutcome {
        if self.done || self.page > self.max_pages {
            self.done = true;
            return PageOutcome::Exhausted;
        }

        let params = [
            ("sort", "pushed".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", REPOS_PER_PAGE.to_string()),
            ("page", self.page.to_string()),
        ];

        let outcome = match self
            .client
            .get_json(&["users", self.login.as_str(), "repos"], &params)
            .await
        {
            // An error object here must not be mistaken for repository data
            Ok(Value::Array(repos)) if repos.is_empty() => PageOutcome::Exhausted,
            Ok(Value::Array(repos)) => PageOutcome::More(repos),
            Ok(_) => PageOutcome::ApiError {
                status: StatusCode::OK,
                message: format!(
                    "unexpected response shape listing repositories of '{}'",
                    self.login
                ),
            },
            Err(e) => PageOutcome::from(e),
        };

        match &outcome {
            PageOutcome::More(repos) => {
                debug!(login = %self.login, page = self.page, count = repos.len(), "Fetched repository page");
                self.page += 1;
            }
            _ => self.done = true,
        }
        outcome
    }

    pub async fn collect_all(mut self) -> Result<Vec<Value>, FetchError> {
        let mut repos = Vec::new();
        while let Some(items) = self.next_page().await.into_result()? {
            repos.extend(items);
        }
        Ok(repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{repo_page, test_config};
    use mockito::Matcher;

    fn page_matcher(page: u32) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("sort".into(), "pushed".into()),
            Matcher::UrlEncoded("direction".into(), "desc".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
        ])
    }

    #[tokio::test]
    async fn test_caps_at_max_pages() {
        let mut server = mockito::Server::new_async().await;
        // GitHub would keep answering with full pages
        let mock = server
            .mock("GET", "/users/prolific/repos")
            .match_query(Matcher::Any)
            .with_body(repo_page("prolific", 100))
            .expect(5)
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url(), None)).unwrap();
        let repos = RepoListing::new(&client, "prolific", 5)
            .collect_all()
            .await
            .unwrap();

        assert_eq!(repos.len(), 500);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_stops_early_on_empty_page() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/users/octocat/repos")
            .match_query(page_matcher(1))
            .with_body(repo_page("octocat", 10))
            .create_async()
            .await;
        let second = server
            .mock("GET", "/users/octocat/repos")
            .match_query(page_matcher(2))
            .with_body("[]")
            .create_async()
            .await;
        let third = server
            .mock("GET", "/users/octocat/repos")
            .match_query(page_matcher(3))
            .with_body(repo_page("octocat", 10))
            .expect(0)
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url(), None)).unwrap();
        let repos = RepoListing::new(&client, "octocat", 5)
            .collect_all()
            .await
            .unwrap();

        assert_eq!(repos.len(), 10);
        assert_eq!(repos[0]["full_name"], "octocat/repo-0");
        first.assert_async().await;
        second.assert_async().await;
        third.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_object_is_not_repository_data() {
        let mut server = mockito::Server::new_async().await;
        // 200 with an object body, e.g. a proxy answering for GitHub
        server
            .mock("GET", "/users/octocat/repos")
            .match_query(Matcher::Any)
            .with_body(r#"{"message":"something went wrong"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url(), None)).unwrap();
        let mut listing = RepoListing::new(&client, "octocat", 5);

        assert!(matches!(
            listing.next_page().await,
            PageOutcome::ApiError { .. }
        ));
        assert!(matches!(listing.next_page().await, PageOutcome::Exhausted));
    }

    #[tokio::test]
    async fn test_not_found_user() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/ghost/repos")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url(), None)).unwrap();
        let result = RepoListing::new(&client, "ghost", 5).collect_all().await;

        assert!(matches!(
            result,
            Err(FetchError::Api { status, .. }) if status == StatusCode::NOT_FOUND
        ));
    }
}

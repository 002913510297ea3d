// src/config.rs
// =============================================================================
// Validated run configuration.
//
// The CLI hands us loose strings and numbers; Config checks them once so the
// rest of the program can trust its inputs. The token lives here as a plain
// value and is passed to the HTTP client when it is built, nothing else ever
// looks at the environment.
// =============================================================================

use crate::cli::Cli;
use crate::error::{Result, ScrapeError};
use crate::github::REPOS_PER_PAGE;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const USERS_FILE: &str = "users.csv";
pub const REPOSITORIES_FILE: &str = "repositories.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub token: Option<String>,
    /// Always ends in '/', so Url::join keeps any path prefix (GitHub Enterprise uses /api/v3)
    pub api_base: Url,
    pub location: String,
    pub followers: String,
    pub output_dir: PathBuf,
    pub max_repo_pages: u32,
    pub timeout: Duration,
    pub enrich_profiles: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let api_base = parse_api_base(&cli.api_url)?;

        if cli.max_repo_pages == 0 {
            return Err(ScrapeError::Config(
                "--max-repo-pages must be at least 1".to_string(),
            ));
        }
        if cli.timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "--timeout-secs must be at least 1".to_string(),
            ));
        }

        // An empty GITHUB_TOKEN= line in .env means "no token"
        let token = cli.token.filter(|t| !t.trim().is_empty());

        Ok(Self {
            token,
            api_base,
            location: cli.location,
            followers: cli.followers,
            output_dir: cli.output_dir,
            max_repo_pages: cli.max_repo_pages,
            timeout: Duration::from_secs(cli.timeout_secs),
            enrich_profiles: cli.enrich_profiles,
        })
    }

    /// The `q` parameter for /search/users
    pub fn search_query(&self) -> String {
        format!("location:{} followers:{}", self.location, self.followers)
    }

    /// Upper bound on repositories exported per user.
    /// Widened to u64 since any u32 page cap is accepted.
    pub fn max_repositories_per_user(&self) -> u64 {
        u64::from(self.max_repo_pages) * u64::from(REPOS_PER_PAGE)
    }

    pub fn users_path(&self) -> PathBuf {
        self.output_dir.join(USERS_FILE)
    }

    pub fn repositories_path(&self) -> PathBuf {
        self.output_dir.join(REPOSITORIES_FILE)
    }
}

fn parse_api_base(raw: &str) -> Result<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| ScrapeError::Config(format!("Invalid API URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ScrapeError::Config(format!(
            "API URL must be http or https: {}",
            raw
        )));
    }

    Ok(url)
}

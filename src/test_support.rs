// src/test_support.rs
// =============================================================================
// Helpers shared by the unit tests: a Config pointed at a mock server and
// canned GitHub JSON payloads.
// =============================================================================

use crate::cli::Cli;
use crate::config::Config;
use clap::Parser;
use serde_json::{json, Value};

pub fn test_config(api_url: &str, token: Option<&str>) -> Config {
    let mut args = vec!["gh-locale-scraper", "--api-url", api_url];
    if let Some(token) = token {
        args.push("--token");
        args.push(token);
    }
    Config::from_cli(Cli::try_parse_from(args).unwrap()).unwrap()
}

/// One item as returned by /search/users
pub fn search_item(login: &str) -> Value {
    json!({
        "login": login,
        "id": 1,
        "type": "User",
        "html_url": format!("https://github.com/{}", login),
        "score": 1.0
    })
}

/// A /search/users page holding `logins`, claiming no other matches exist
pub fn search_page(logins: &[String]) -> String {
    search_page_with_total(logins, logins.len() as u64)
}

/// A /search/users page holding `logins` out of `total_count` matches
pub fn search_page_with_total(logins: &[String], total_count: u64) -> String {
    let items: Vec<Value> = logins.iter().map(|l| search_item(l)).collect();
    json!({
        "total_count": total_count,
        "incomplete_results": false,
        "items": items
    })
    .to_string()
}

/// One item as returned by /users/<login>/repos
pub fn repo_item(owner: &str, name: &str) -> Value {
    json!({
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "owner": { "login": owner },
        "created_at": "2020-01-01T00:00:00Z",
        "stargazers_count": 7,
        "watchers_count": 7,
        "language": "Rust",
        "has_projects": true,
        "has_wiki": false,
        "license": { "key": "mit", "name": "MIT License" }
    })
}

/// A /users/<login>/repos page with `count` repositories
pub fn repo_page(owner: &str, count: usize) -> String {
    let repos: Vec<Value> = (0..count)
        .map(|i| repo_item(owner, &format!("repo-{}", i)))
        .collect();
    Value::Array(repos).to_string()
}

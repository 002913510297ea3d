// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: running the binary with no arguments scrapes
// Seattle users with more than 200 followers into ./users.csv and
// ./repositories.csv. Every flag below only overrides one of those defaults.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Option<T>: For values that may legitimately be missing (the token)
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gh-locale-scraper",
    version,
    about = "Export GitHub users for a location, and their repositories, to CSV",
    long_about = "gh-locale-scraper searches GitHub for users in a location above a follower \
                  threshold, writes them to users.csv, then lists each user's most recently \
                  pushed repositories into repositories.csv."
)]
pub struct Cli {
    /// Location to search for (the `location:` search qualifier)
    #[arg(long, default_value = "Seattle")]
    pub location: String,

    /// Follower filter (the `followers:` search qualifier), e.g. ">200" or "50..100"
    #[arg(long, default_value = ">200", allow_hyphen_values = true)]
    pub followers: String,

    /// GitHub token, sent as `Authorization: token <value>`
    ///
    /// Read from GITHUB_TOKEN (or a .env file) when the flag is omitted
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Directory the CSV files are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum number of 100-repository pages fetched per user
    #[arg(long, default_value_t = 5)]
    pub max_repo_pages: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Fetch each user's full profile (name, company, email, ...) before export
    ///
    /// The search endpoint only returns summaries, so without this flag most
    /// user columns stay empty. Costs one extra request per user.
    #[arg(long)]
    pub enrich_profiles: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why no subcommands?
//    - The tool does one thing, so a flat struct is enough
//    - A `Commands` enum is for tools with several verbs
//
// 2. What does `env = "GITHUB_TOKEN"` do?
//    - If --token is not given, clap reads the GITHUB_TOKEN variable
//    - hide_env_values keeps the token out of --help output
//
// 3. default_value vs default_value_t:
//    - default_value takes a string and parses it like user input
//    - default_value_t takes an already-typed value (5, 30)
//
// 4. Why is `token` an Option<String>?
//    - A run without a token is allowed (just heavily rate limited)
//    - Option makes "no token" a value the compiler forces us to handle
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_query() {
        let cli = Cli::try_parse_from(["gh-locale-scraper", "--token", "abc"]).unwrap();
        assert_eq!(cli.location, "Seattle");
        assert_eq!(cli.followers, ">200");
        assert_eq!(cli.max_repo_pages, 5);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(!cli.enrich_profiles);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "gh-locale-scraper",
            "--location",
            "Berlin",
            "--followers",
            "50..100",
            "--max-repo-pages",
            "2",
            "--enrich-profiles",
        ])
        .unwrap();
        assert_eq!(cli.location, "Berlin");
        assert_eq!(cli.followers, "50..100");
        assert_eq!(cli.max_repo_pages, 2);
        assert!(cli.enrich_profiles);
    }
}

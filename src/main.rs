// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load a .env file if there is one (so GITHUB_TOKEN can live there)
// 2. Set up logging (RUST_LOG controls the level, default "info")
// 3. Parse command-line arguments and validate them into a Config
// 4. Run the scrape and print a summary
// 5. Exit with proper code (0 = complete, 1 = some users skipped, 2 = error)
//
// Rust concepts used:
// - async/await: reqwest is async, so we run it on a single-threaded tokio
//   runtime and simply await one request after another
// - Result<T, E>: For error handling
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - validated settings
mod error; // src/error.rs - error types
mod export; // src/export/ - records and CSV output
mod github; // src/github/ - GitHub API client and paginators
mod scrape; // src/scrape.rs - the scrape itself

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Everything happens sequentially, so one thread is all we need
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Loaded before logging starts, so RUST_LOG may live in .env too
    let dotenv_result = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(problem) = dotenv_problem(&dotenv_result) {
        warn!("{}", problem);
    }

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Checks the outcome of loading .env
//
// Returns: a message worth warning about, or None
//   - No .env file at all is normal (the token can come from the real
//     environment), so that gives None
//   - A .env that exists but cannot be read or parsed gives Some, because
//     GITHUB_TOKEN may be sitting in it unused
fn dotenv_problem(result: &std::result::Result<PathBuf, dotenvy::Error>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!(
            "Could not load .env, continuing without it (GITHUB_TOKEN may be missing): {}",
            e
        )),
    }
}

// Returns:
//   Ok(0) = every user and their repositories exported
//   Ok(1) = files written, but some users' repositories could not be listed,
//           or the search matched more users than GitHub would return
//   Err   = nothing usable was produced
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;

    println!(
        "🔍 Searching GitHub users: {}",
        config.search_query()
    );
    println!(
        "📚 Up to {} repositories per user",
        config.max_repositories_per_user()
    );

    let summary = scrape::run(&config).await?;

    println!();
    println!("📊 Summary:");
    println!(
        "   👤 Users: {} -> {}",
        summary.users_written,
        config.users_path().display()
    );
    println!(
        "   📦 Repositories: {} -> {}",
        summary.repositories_written,
        config.repositories_path().display()
    );

    if summary.skipped_repositories > 0 {
        println!(
            "   ⚠️  Repositories without a name skipped: {}",
            summary.skipped_repositories
        );
    }

    if summary.is_complete() {
        return Ok(0);
    }

    if summary.search_truncated {
        let total = summary
            .search_total_count
            .map(|t| t.to_string())
            .unwrap_or_else(|| "an unknown number of".to_string());
        println!(
            "   ✂️  Search truncated: {} of {} matching users exported (GitHub serves at most 1000)",
            summary.users_written, total
        );
    }

    if !summary.skipped_users.is_empty() {
        println!(
            "   ❌ Users whose repositories could not be listed: {}",
            summary.skipped_users.len()
        );
        for skipped in &summary.skipped_users {
            println!("      {}: {}", skipped.login, skipped.reason);
        }
    }
    Ok(1)
}

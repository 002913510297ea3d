// src/export/normalize.rs
// =============================================================================
// Maps raw GitHub JSON onto the two output schemas.
//
// Every field is read with a "get or default" accessor. If GitHub drops or
// renames a field, the affected column comes out empty (or 0 / false)
// instead of the whole run failing on one odd record.
//
// Rust concepts:
// - Option combinators: and_then / map / unwrap_or_default chain lookups
// - serde::Serialize: The field order of each struct is the CSV column order
// =============================================================================

use serde::Serialize;
use serde_json::Value;

/// One row of users.csv
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub login: String,
    pub name: String,
    pub company: String,
    pub location: String,
    pub email: String,
    /// None becomes an empty cell
    pub hireable: Option<bool>,
    pub bio: String,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub created_at: String,
}

impl UserRecord {
    pub fn from_json(user: &Value) -> Self {
        Self {
            login: string_field(user, "login"),
            name: string_field(user, "name"),
            company: clean_company_name(user.get("company").and_then(Value::as_str)),
            location: string_field(user, "location"),
            email: string_field(user, "email"),
            hireable: user.get("hireable").and_then(Value::as_bool),
            bio: string_field(user, "bio"),
            public_repos: count_field(user, "public_repos"),
            followers: count_field(user, "followers"),
            following: count_field(user, "following"),
            created_at: string_field(user, "created_at"),
        }
    }
}

/// One row of repositories.csv
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRecord {
    /// Owner login
    pub login: String,
    pub full_name: String,
    pub created_at: String,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub language: String,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub license_name: String,
}

impl RepositoryRecord {
    /// Returns None when the repository has no `full_name`, since a row we
    /// cannot identify is worse than no row.
    ///
    /// `listed_for` is the login whose listing produced this repository. It
    /// fills in the owner if `owner.login` is missing, so every row still
    /// points at a user in users.csv.
    pub fn from_json(repo: &Value, listed_for: &str) -> Option<Self> {
        let full_name = repo
            .get("full_name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())?
            .to_string();

        let login = repo
            .get("owner")
            .and_then(|owner| owner.get("login"))
            .and_then(Value::as_str)
            .unwrap_or(listed_for)
            .to_string();

        let license_name = repo
            .get("license")
            .and_then(|license| license.get("key"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(Self {
            login,
            full_name,
            created_at: string_field(repo, "created_at"),
            stargazers_count: count_field(repo, "stargazers_count"),
            watchers_count: count_field(repo, "watchers_count"),
            language: string_field(repo, "language"),
            has_projects: flag_field(repo, "has_projects"),
            has_wiki: flag_field(repo, "has_wiki"),
            license_name,
        })
    }
}

/// Trims, drops one leading '@', upper-cases. Missing or blank gives "".
///
/// "  @acme " -> "ACME", "Acme Corp" -> "ACME CORP"
pub fn clean_company_name(company: Option<&str>) -> String {
    match company {
        Some(c) if !c.trim().is_empty() => {
            let trimmed = c.trim();
            trimmed
                .strip_prefix('@')
                .unwrap_or(trimmed)
                .to_uppercase()
        }
        _ => String::new(),
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn count_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or_default()
}

fn flag_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or_default()
}

// src/export/writer.rs
// =============================================================================
// Writes records to a CSV file, header first, replacing whatever was there.
// =============================================================================

use super::normalize::{RepositoryRecord, UserRecord};
use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// A record type that has a fixed CSV header
pub trait Tabular: Serialize {
    const HEADERS: &'static [&'static str];
}

impl Tabular for UserRecord {
    const HEADERS: &'static [&'static str] = &[
        "login",
        "name",
        "company",
        "location",
        "email",
        "hireable",
        "bio",
        "public_repos",
        "followers",
        "following",
        "created_at",
    ];
}

impl Tabular for RepositoryRecord {
    const HEADERS: &'static [&'static str] = &[
        "login",
        "full_name",
        "created_at",
        "stargazers_count",
        "watchers_count",
        "language",
        "has_projects",
        "has_wiki",
        "license_name",
    ];
}

/// Writes `records` to `path`. The header row is written even when
/// `records` is empty.
pub fn write_csv<T: Tabular>(path: &Path, records: &[T]) -> Result<()> {
    // csv only emits headers alongside the first serialized row, so we write our own
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = records.len(), "Wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn user(login: &str, company: &str, hireable: Option<bool>) -> UserRecord {
        UserRecord {
            login: login.to_string(),
            name: "Jane, \"JD\" Doe".to_string(),
            company: company.to_string(),
            location: "Seattle".to_string(),
            email: String::new(),
            hireable,
            bio: String::new(),
            public_repos: 3,
            followers: 250,
            following: 1,
            created_at: "2015-03-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");

        write_csv(&path, &[user("jd", "ACME", None), user("jd2", "", Some(true))]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "login,name,company,location,email,hireable,bio,public_repos,followers,following,created_at"
        );
        assert_eq!(
            lines[1],
            "jd,\"Jane, \"\"JD\"\" Doe\",ACME,Seattle,,,,3,250,1,2015-03-01T00:00:00Z"
        );
        assert_eq!(
            lines[2],
            "jd2,\"Jane, \"\"JD\"\" Doe\",,Seattle,,true,,3,250,1,2015-03-01T00:00:00Z"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repositories.csv");

        write_csv::<RepositoryRecord>(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "login,full_name,created_at,stargazers_count,watchers_count,language,has_projects,has_wiki,license_name\n"
        );
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(&path, "stale\nstale\nstale\nstale\n").unwrap();

        write_csv(&path, &[user("jd", "", None)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("stale"));
    }
}

//! Sample data shared across test suites.

use beacon_types::{Profile, ProfileProject};
use chrono::{DateTime, FixedOffset, Utc};

/// Parse an RFC 3339 timestamp, panicking on malformed test input.
pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap_or_else(|e| panic!("bad timestamp {}: {}", s, e))
        .with_timezone(&Utc)
}

/// Parse an RFC 3339 timestamp keeping its offset.
pub fn fixed(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap_or_else(|e| panic!("bad timestamp {}: {}", s, e))
}

/// Profile over `(id, name)` project pairs, created at a fixed instant.
pub fn profile(name: &str, team_id: &str, projects: &[(&str, &str)]) -> Profile {
    Profile::new(
        name,
        team_id,
        projects
            .iter()
            .map(|(id, name)| ProfileProject {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
        utc("2024-05-01T09:00:00Z"),
    )
}

//! Entity trait - common interface for named server entities

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::error::{DradisError, Result};

/// Common trait for entities that can be looked up by id or by name
pub trait Entity: Serialize + DeserializeOwned {
    /// Human-readable kind used in messages (e.g., "node", "issue")
    const KIND: &'static str;

    /// Server-assigned id
    fn id(&self) -> u64;

    /// The field name lookups match against: project/team name, node label,
    /// issue/note/library-entry title
    fn name(&self) -> &str;
}

/// Case-insensitive exact comparison used by every by-name lookup
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// First entity (in list order) whose name matches, case-insensitively
pub fn find_by_name<E: Entity>(entities: Vec<E>, name: &str) -> Result<E> {
    entities
        .into_iter()
        .find(|e| names_match(e.name(), name))
        .ok_or_else(|| DradisError::not_found(E::KIND, name))
}

/// Entity with the given id, borrowed from a list
pub fn find_ref_by_id<E: Entity>(entities: &[E], id: u64) -> Result<&E> {
    entities
        .iter()
        .find(|e| e.id() == id)
        .ok_or_else(|| DradisError::not_found(E::KIND, id))
}

/// Parse a server timestamp (RFC 3339), if present and well formed
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_names_match_ignores_case_only() {
        assert!(names_match("WebServer", "webserver"));
        assert!(names_match("Ärger", "ärger"));
        assert!(!names_match("WebServer", "webserver01"));
        assert!(!names_match("Web Server", "webserver"));
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp(Some("2021-03-04T10:11:12.000+01:00")).unwrap();
        assert_eq!(ts.year(), 2021);
        assert_eq!(ts.format("%H").to_string(), "09");
        assert!(parse_timestamp(Some("yesterday")).is_none());
        assert!(parse_timestamp(None).is_none());
    }
}

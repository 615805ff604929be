//! Team entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;

/// Shallow project summary listed on a team (id and name only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProject {
    pub id: u64,
    pub name: String,
}

/// A team (formerly "client") owning projects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,

    /// The API still reports this under its old `client_since` name
    #[serde(
        default,
        rename = "client_since",
        alias = "team_since",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_since: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, deserialize_with = "crate::entities::null_as_default")]
    pub projects: Vec<TeamProject>,
}

impl Team {
    pub fn since(&self) -> Option<NaiveDate> {
        self.team_since
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok())
    }
}

impl Entity for Team {
    const KIND: &'static str = "team";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_team_since_from_client_since() {
        let json = r#"{"id": 2, "name": "Red", "client_since": "2019-05-01",
                       "projects": [{"id": 9, "name": "Internal"}]}"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.since(), NaiveDate::from_ymd_opt(2019, 5, 1));
        assert_eq!(team.projects[0].name, "Internal");
    }

    #[test]
    fn test_decode_team_since_alias() {
        let json = r#"{"id": 2, "name": "Red", "team_since": "2019-05-01T00:00:00Z"}"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.since(), NaiveDate::from_ymd_opt(2019, 5, 1));
        assert!(team.projects.is_empty());
    }
}

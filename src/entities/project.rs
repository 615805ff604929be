//! Project entity - root of the node/issue hierarchy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{parse_timestamp, Entity};
use crate::core::links::ProjectRef;

/// Client (team) a project was created for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectClient {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// A user listed as author or owner of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub email: String,
}

/// A Dradis project
///
/// Nodes and issues are not embedded; they are fetched on demand and carry
/// a [`ProjectRef`] back to the project they were fetched for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ProjectClient>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, deserialize_with = "crate::entities::null_as_default")]
    pub authors: Vec<Member>,

    #[serde(default, deserialize_with = "crate::entities::null_as_default")]
    pub owners: Vec<Member>,
}

impl Project {
    /// Back-reference handed to nodes and issues of this project
    pub fn to_ref(&self) -> ProjectRef {
        ProjectRef { id: self.id }
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

impl Entity for Project {
    const KIND: &'static str = "project";

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
    fn test_decode_project() {
        let json = r#"{
            "id": 45,
            "name": "External Pentest",
            "client": {"id": 1, "name": "ACME"},
            "created_at": "2020-01-02T03:04:05.000Z",
            "updated_at": "2020-01-03T03:04:05.000Z",
            "authors": [{"email": "a@example.com"}],
            "owners": null
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.id, 45);
        assert_eq!(project.client.as_ref().unwrap().name, "ACME");
        assert_eq!(project.authors.len(), 1);
        assert!(project.owners.is_empty());
        assert!(project.created().is_some());
        assert_eq!(project.to_ref(), ProjectRef { id: 45 });
    }
}

//! Issue entity - a project-scoped finding

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{parse_timestamp, Entity};
use crate::core::error::Result;
use crate::core::fields::OrderedFieldMap;
use crate::core::links::ProjectRef;

/// A finding recorded against a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub fields: OrderedFieldMap,

    /// Raw block text as stored on the server
    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Owning project; set by wiring
    #[serde(skip)]
    pub project: Option<ProjectRef>,
}

impl Issue {
    pub fn copy_fields(&self) -> OrderedFieldMap {
        self.fields.clone()
    }

    pub fn field(&self, key: &str) -> Result<&str> {
        self.fields.require(key)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

impl Entity for Issue {
    const KIND: &'static str = "issue";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_fields_is_detached() {
        let mut issue = Issue::default();
        issue.fields.set("Rating", "High");

        let mut fields = issue.copy_fields();
        fields.set("Rating", "Low");

        assert_eq!(issue.field("Rating").unwrap(), "High");
        assert_eq!(fields.get("Rating"), Some("Low"));
    }
}

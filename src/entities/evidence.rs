//! Evidence entity - content documenting an issue on a node

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::fields::OrderedFieldMap;
use crate::core::links::NodeRef;

/// Copy of the issue sub-fields the server embeds in each evidence record
///
/// This is a snapshot, not a link: issues are owned by the project and
/// fetched independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceIssue {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// A piece of evidence attached to a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: u64,

    /// Raw block text as stored on the server
    #[serde(default)]
    pub content: String,

    /// Parsed view of `content`
    #[serde(default)]
    pub fields: OrderedFieldMap,

    #[serde(default)]
    pub issue: EvidenceIssue,

    /// Owning node; set by wiring, never sent or received
    #[serde(skip)]
    pub node: Option<NodeRef>,
}

impl Evidence {
    /// Independent copy of the fields, for building an update
    pub fn copy_fields(&self) -> OrderedFieldMap {
        self.fields.clone()
    }

    /// Value of a field, failing with `FieldNotFound` if absent
    pub fn field(&self, key: &str) -> Result<&str> {
        self.fields.require(key)
    }

    /// True if this evidence is wired to the given node
    pub fn belongs_to(&self, node: NodeRef) -> bool {
        self.node == Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DradisError;

    #[test]
    fn test_decode_leaves_node_unset() {
        let json = r##"{
            "id": 12,
            "content": "#[Port]#\r\n443/tcp\r\n\r\n",
            "fields": {"Port": "443/tcp", "Label": "Web"},
            "issue": {"id": 3, "title": "Weak TLS", "url": "/pro/api/issues/3"}
        }"##;
        let evidence: Evidence = serde_json::from_str(json).unwrap();

        assert_eq!(evidence.issue.title, "Weak TLS");
        assert_eq!(evidence.field("Port").unwrap(), "443/tcp");
        assert!(evidence.node.is_none());
    }

    #[test]
    fn test_missing_field() {
        let evidence = Evidence::default();
        assert!(matches!(
            evidence.field("Port"),
            Err(DradisError::FieldNotFound(_))
        ));
    }

    #[test]
    fn test_node_is_not_serialized() {
        let evidence = Evidence {
            id: 1,
            node: Some(NodeRef { id: 5, project: None }),
            ..Default::default()
        };
        let json = serde_json::to_string(&evidence).unwrap();
        assert!(!json.contains("node"));
    }
}

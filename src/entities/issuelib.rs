//! Issue library entity - reusable issue templates

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::fields::OrderedFieldMap;

/// An entry of the issue library add-on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueLibEntry {
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub fields: OrderedFieldMap,

    #[serde(default)]
    pub state: u32,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl IssueLibEntry {
    pub fn copy_fields(&self) -> OrderedFieldMap {
        self.fields.clone()
    }
}

impl Entity for IssueLibEntry {
    const KIND: &'static str = "issue library entry";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.title
    }
}

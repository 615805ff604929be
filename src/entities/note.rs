//! Note entity

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::error::Result;
use crate::core::fields::OrderedFieldMap;
use crate::core::links::NodeRef;

/// Category the server files new notes under when none is given
pub const DEFAULT_NOTE_CATEGORY: u64 = 6;

/// A note attached to a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,

    #[serde(default)]
    pub category_id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub fields: OrderedFieldMap,

    #[serde(default)]
    pub text: String,

    /// Owning node; set by wiring
    #[serde(skip)]
    pub node: Option<NodeRef>,
}

impl Note {
    pub fn copy_fields(&self) -> OrderedFieldMap {
        self.fields.clone()
    }

    pub fn field(&self, key: &str) -> Result<&str> {
        self.fields.require(key)
    }

    pub fn belongs_to(&self, node: NodeRef) -> bool {
        self.node == Some(node)
    }
}

impl Entity for Note {
    const KIND: &'static str = "note";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.title
    }
}

//! Attachment entity
//!
//! Attachments are not stored on the node. Each one only carries the node
//! reference supplied by the call that produced it.

use serde::{Deserialize, Serialize};

use crate::core::links::NodeRef;

/// A file attached to a node, identified by its filename
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,

    /// Download path reported by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(skip)]
    pub node: Option<NodeRef>,
}

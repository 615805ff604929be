//! Node entity and the evidence/note graph hanging off it
//!
//! A node exclusively owns its evidence and notes. Every child in those
//! lists must point back at this node (see [`Node::wire_children`]); the
//! wiring is not on the wire, so the client re-applies it after each fetch,
//! create or update, and the mutation helpers keep it intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{find_ref_by_id, names_match, parse_timestamp, Entity};
use crate::core::error::{DradisError, Result};
use crate::core::links::{NodeRef, ProjectRef};
use crate::entities::evidence::Evidence;
use crate::entities::note::Note;

/// Node type as reported by `type_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum NodeType {
    #[default]
    Default,
    Host,
    /// Internal node types (methodologies, plugin output, ...)
    Other(u32),
}

impl From<u32> for NodeType {
    fn from(value: u32) -> Self {
        match value {
            0 => NodeType::Default,
            1 => NodeType::Host,
            other => NodeType::Other(other),
        }
    }
}

impl From<NodeType> for u32 {
    fn from(value: NodeType) -> Self {
        match value {
            NodeType::Default => 0,
            NodeType::Host => 1,
            NodeType::Other(other) => other,
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeType::Default => write!(f, "default"),
            NodeType::Host => write!(f, "host"),
            NodeType::Other(id) => write!(f, "type-{}", id),
        }
    }
}

impl std::str::FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(NodeType::Default),
            "host" => Ok(NodeType::Host),
            other => other
                .parse::<u32>()
                .map(NodeType::from)
                .map_err(|_| format!("Unknown node type: {}", s)),
        }
    }
}

/// A node (host or grouping) within a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub type_id: NodeType,

    /// Parent node; acyclicity is enforced by the server, not checked here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    /// Ordering hint among siblings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, deserialize_with = "crate::entities::null_as_default")]
    pub evidence: Vec<Evidence>,

    #[serde(default, deserialize_with = "crate::entities::null_as_default")]
    pub notes: Vec<Note>,

    /// Owning project; set by wiring
    #[serde(skip)]
    pub project: Option<ProjectRef>,
}

impl Node {
    /// Back-reference handed to this node's children
    pub fn to_ref(&self) -> NodeRef {
        NodeRef {
            id: self.id,
            project: self.project,
        }
    }

    /// Attach the node to its project and rewire all children
    pub fn attach(&mut self, project: ProjectRef) {
        self.project = Some(project);
        self.wire_children();
    }

    /// Point every evidence and note at this node
    pub fn wire_children(&mut self) {
        let node = self.to_ref();
        for evidence in &mut self.evidence {
            evidence.node = Some(node);
        }
        for note in &mut self.notes {
            note.node = Some(node);
        }
        tracing::trace!(
            node = self.id,
            evidence = self.evidence.len(),
            notes = self.notes.len(),
            "wired node children"
        );
    }

    /// True when the node has a project and all children point back at it
    pub fn is_wired(&self) -> bool {
        let node = self.to_ref();
        self.project.is_some()
            && self.evidence.iter().all(|e| e.belongs_to(node))
            && self.notes.iter().all(|n| n.belongs_to(node))
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref())
    }

    // ---- evidence ----

    pub fn evidence_by_id(&self, id: u64) -> Result<&Evidence> {
        self.evidence
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| DradisError::not_found("evidence", id))
    }

    pub fn evidence_by_id_mut(&mut self, id: u64) -> Result<&mut Evidence> {
        self.evidence
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DradisError::not_found("evidence", id))
    }

    /// All evidence whose issue title matches, ignoring case
    pub fn evidence_by_issue_title(&self, title: &str) -> Vec<&Evidence> {
        self.evidence
            .iter()
            .filter(|e| names_match(&e.issue.title, title))
            .collect()
    }

    /// All evidence whose fields hold exactly `key: value` (case-sensitive).
    /// Evidence without the key is skipped.
    pub fn evidence_by_field(&self, key: &str, value: &str) -> Vec<&Evidence> {
        self.evidence
            .iter()
            .filter(|e| e.fields.get(key) == Some(value))
            .collect()
    }

    /// Append evidence, wiring it to this node
    pub fn add_evidence(&mut self, mut evidence: Evidence) {
        evidence.node = Some(self.to_ref());
        self.evidence.push(evidence);
    }

    /// Remove evidence by id, keeping the order of the rest.
    /// An unknown id is a no-op.
    pub fn remove_evidence(&mut self, id: u64) -> Option<Evidence> {
        let index = self.evidence.iter().position(|e| e.id == id)?;
        Some(self.evidence.remove(index))
    }

    // ---- notes ----

    pub fn note_by_id(&self, id: u64) -> Result<&Note> {
        find_ref_by_id(&self.notes, id)
    }

    pub fn note_by_id_mut(&mut self, id: u64) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DradisError::not_found("note", id))
    }

    /// All notes whose title matches, ignoring case
    pub fn notes_by_title(&self, title: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| names_match(&n.title, title))
            .collect()
    }

    pub fn add_note(&mut self, mut note: Note) {
        note.node = Some(self.to_ref());
        self.notes.push(note);
    }

    /// Remove a note by id, keeping the order of the rest.
    /// An unknown id is a no-op.
    pub fn remove_note(&mut self, id: u64) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }
}

impl Entity for Node {
    const KIND: &'static str = "node";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.label
    }
}

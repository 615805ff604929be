//! Entity type definitions
//!
//! The Dradis object hierarchy as seen by the client:
//!
//! - [`Project`] - root of a hierarchy; nodes and issues are fetched per project
//! - [`Team`] - owner of projects, listing shallow project summaries
//! - [`Node`] - host or grouping inside a project, owning its [`Evidence`] and [`Note`]s
//! - [`Issue`] - project-scoped finding
//! - [`Attachment`] - file stored on a node
//! - [`IssueLibEntry`] - reusable issue template from the issue library add-on

use serde::{Deserialize, Deserializer};

pub mod attachment;
pub mod evidence;
pub mod issue;
pub mod issuelib;
pub mod node;
pub mod note;
pub mod project;
pub mod team;

pub use attachment::Attachment;
pub use evidence::{Evidence, EvidenceIssue};
pub use issue::Issue;
pub use issuelib::IssueLibEntry;
pub use node::{Node, NodeType};
pub use note::{Note, DEFAULT_NOTE_CATEGORY};
pub use project::{Member, Project, ProjectClient};
pub use team::{Team, TeamProject};

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

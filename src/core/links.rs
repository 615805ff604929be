//! Back-references from child entities to their parents
//!
//! Children are owned by exactly one collection (a node owns its evidence
//! and notes, the caller owns the nodes of a project). Upward links are
//! therefore plain id handles rather than pointers: they never own the
//! parent, cannot form reference cycles, and carry exactly what request
//! paths need. They are not part of the wire format and are rebuilt after
//! every decode.

use crate::core::error::{DradisError, Result};

/// Upward reference from a node or issue to its project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectRef {
    pub id: u64,
}

/// Upward reference from evidence, notes or attachments to their node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub id: u64,
    /// Project the node belongs to, if the node itself was wired
    pub project: Option<ProjectRef>,
}

impl NodeRef {
    /// `(project id, node id)` for node-scoped request paths
    pub fn scope(&self, entity: &'static str) -> Result<(u64, u64)> {
        let project = self.project.ok_or(DradisError::Detached {
            entity,
            parent: "project",
        })?;
        Ok((project.id, self.id))
    }
}

/// Resolve an optional back-reference or fail with [`DradisError::Detached`]
pub fn require_project(project: Option<ProjectRef>, entity: &'static str) -> Result<ProjectRef> {
    project.ok_or(DradisError::Detached {
        entity,
        parent: "project",
    })
}

/// Resolve an optional node back-reference down to the ids a request needs
pub fn require_node(node: Option<NodeRef>, entity: &'static str) -> Result<(u64, u64)> {
    node.ok_or(DradisError::Detached {
        entity,
        parent: "node",
    })?
    .scope(entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_of_wired_node() {
        let node = NodeRef {
            id: 7,
            project: Some(ProjectRef { id: 3 }),
        };
        assert_eq!(node.scope("evidence").unwrap(), (3, 7));
        assert_eq!(require_node(Some(node), "note").unwrap(), (3, 7));
    }

    #[test]
    fn test_detached_references() {
        let orphan = NodeRef { id: 7, project: None };
        assert!(matches!(
            orphan.scope("evidence"),
            Err(DradisError::Detached { parent: "project", .. })
        ));
        assert!(matches!(
            require_node(None, "note"),
            Err(DradisError::Detached { parent: "node", .. })
        ));
        assert!(require_project(None, "issue").is_err());
    }
}

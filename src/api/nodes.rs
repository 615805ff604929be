//! Nodes endpoint (project scoped)

use serde::Serialize;

use super::{decode, envelope, DradisClient};
use crate::core::entity::find_by_name;
use crate::core::error::{DradisError, Result};
use crate::core::links::require_project;
use crate::core::transport::{ApiRequest, Transport};
use crate::entities::{Node, NodeType, Project};

/// Fields for creating or updating a node. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<NodeType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl NodeParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(label: impl Into<String>, type_id: NodeType) -> Self {
        Self::new().label(label).node_type(type_id)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn node_type(mut self, type_id: NodeType) -> Self {
        self.type_id = Some(type_id);
        self
    }

    pub fn parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }
}

impl<T: Transport> DradisClient<T> {
    /// All nodes of a project, each wired to the project and to its children
    pub fn nodes(&self, project: &Project) -> Result<Vec<Node>> {
        let mut nodes: Vec<Node> = self.fetch(
            "list nodes",
            "node list",
            ApiRequest::get("nodes").in_project(project.id),
        )?;
        let project_ref = project.to_ref();
        for node in &mut nodes {
            node.attach(project_ref);
        }
        tracing::debug!(project = project.id, count = nodes.len(), "fetched nodes");
        Ok(nodes)
    }

    pub fn node(&self, project: &Project, id: u64) -> Result<Node> {
        let mut node: Node = self.fetch(
            "get node",
            "node",
            ApiRequest::get(format!("nodes/{}", id)).in_project(project.id),
        )?;
        node.attach(project.to_ref());
        Ok(node)
    }

    /// First node whose label matches, ignoring case
    pub fn node_by_label(&self, project: &Project, label: &str) -> Result<Node> {
        find_by_name(self.nodes(project)?, label)
    }

    pub fn create_node(&self, project: &Project, params: &NodeParams) -> Result<Node> {
        let body = envelope("node", params)?;
        let mut node: Node = self.fetch(
            "create node",
            "node",
            ApiRequest::post("nodes", body).in_project(project.id),
        )?;
        node.attach(project.to_ref());
        Ok(node)
    }

    /// Update a node in place. Evidence and notes the response leaves out
    /// (or sends as `null`) are kept from the local copy.
    pub fn update_node(&self, node: &mut Node, params: &NodeParams) -> Result<()> {
        let project = require_project(node.project, "node")?;
        let body = envelope("node", params)?;
        let response = self.execute(
            "update node",
            ApiRequest::put(format!("nodes/{}", node.id), body).in_project(project.id),
        )?;

        let raw: serde_json::Value = decode("node", &response.body)?;
        let present = |key: &str| raw.get(key).is_some_and(|v| !v.is_null());
        let has_evidence = present("evidence");
        let has_notes = present("notes");
        let mut updated: Node = serde_json::from_value(raw)
            .map_err(|source| DradisError::Decode { entity: "node", source })?;

        if !has_evidence {
            updated.evidence = std::mem::take(&mut node.evidence);
        }
        if !has_notes {
            updated.notes = std::mem::take(&mut node.notes);
        }
        updated.attach(project);
        *node = updated;
        Ok(())
    }

    pub fn delete_node(&self, node: &Node) -> Result<()> {
        let project = require_project(node.project, "node")?;
        self.execute(
            "delete node",
            ApiRequest::delete(format!("nodes/{}", node.id)).in_project(project.id),
        )?;
        Ok(())
    }
}

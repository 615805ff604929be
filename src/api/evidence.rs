//! Evidence endpoint (node scoped)

use serde::Serialize;

use super::{envelope, DradisClient};
use crate::core::codec::encode_fields;
use crate::core::error::Result;
use crate::core::fields::OrderedFieldMap;
use crate::core::links::{require_node, require_project};
use crate::core::transport::{ApiRequest, Transport};
use crate::entities::{Evidence, Issue, Node};

/// Replacement content for an existing evidence record
///
/// The server needs the whole field set on every update, so the content is
/// mandatory. The issue is only sent when it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpdate {
    pub content: String,
    pub issue_id: Option<u64>,
}

impl EvidenceUpdate {
    pub fn from_fields(fields: &OrderedFieldMap) -> Self {
        Self::from_text(encode_fields(fields))
    }

    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            issue_id: None,
        }
    }

    /// Move the evidence to another issue
    pub fn with_issue(mut self, issue: &Issue) -> Self {
        self.issue_id = Some(issue.id);
        self
    }
}

/// Wire shape; the API takes `issue_id` as a string
#[derive(Serialize)]
struct EvidencePayload<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue_id: Option<String>,
}

impl<T: Transport> DradisClient<T> {
    /// Evidence of a node, fetched fresh and pointed at that node
    pub fn evidence(&self, node: &Node) -> Result<Vec<Evidence>> {
        let project = require_project(node.project, "node")?;
        let mut evidence: Vec<Evidence> = self.fetch(
            "list evidence",
            "evidence list",
            ApiRequest::get(format!("nodes/{}/evidence", node.id)).in_project(project.id),
        )?;
        let node_ref = node.to_ref();
        for e in &mut evidence {
            e.node = Some(node_ref);
        }
        Ok(evidence)
    }

    pub fn evidence_by_id(&self, node: &Node, id: u64) -> Result<Evidence> {
        let project = require_project(node.project, "node")?;
        let mut evidence: Evidence = self.fetch(
            "get evidence",
            "evidence",
            ApiRequest::get(format!("nodes/{}/evidence/{}", node.id, id)).in_project(project.id),
        )?;
        evidence.node = Some(node.to_ref());
        Ok(evidence)
    }

    pub fn create_evidence(
        &self,
        node: &mut Node,
        issue: &Issue,
        fields: &OrderedFieldMap,
    ) -> Result<Evidence> {
        self.create_evidence_from_text(node, issue, &encode_fields(fields))
    }

    /// Create evidence for `issue` on `node`. The node's evidence list grows
    /// only once the server has confirmed the creation.
    pub fn create_evidence_from_text(
        &self,
        node: &mut Node,
        issue: &Issue,
        content: &str,
    ) -> Result<Evidence> {
        let project = require_project(node.project, "node")?;
        let payload = EvidencePayload {
            content,
            issue_id: Some(issue.id.to_string()),
        };
        let mut evidence: Evidence = self.fetch(
            "create evidence",
            "evidence",
            ApiRequest::post(
                format!("nodes/{}/evidence", node.id),
                envelope("evidence", &payload)?,
            )
            .in_project(project.id),
        )?;
        evidence.node = Some(node.to_ref());
        node.add_evidence(evidence.clone());
        tracing::debug!(node = node.id, evidence = evidence.id, "created evidence");
        Ok(evidence)
    }

    /// Update evidence in place, keeping its node reference
    pub fn update_evidence(&self, evidence: &mut Evidence, update: &EvidenceUpdate) -> Result<()> {
        let (project_id, node_id) = require_node(evidence.node, "evidence")?;
        let payload = EvidencePayload {
            content: &update.content,
            issue_id: update.issue_id.map(|id| id.to_string()),
        };
        let mut updated: Evidence = self.fetch(
            "update evidence",
            "evidence",
            ApiRequest::put(
                format!("nodes/{}/evidence/{}", node_id, evidence.id),
                envelope("evidence", &payload)?,
            )
            .in_project(project_id),
        )?;
        updated.node = evidence.node;
        *evidence = updated;
        Ok(())
    }

    /// Delete evidence on the server, then drop it from the node's list
    pub fn delete_evidence(&self, node: &mut Node, id: u64) -> Result<()> {
        let project = require_project(node.project, "node")?;
        self.execute(
            "delete evidence",
            ApiRequest::delete(format!("nodes/{}/evidence/{}", node.id, id)).in_project(project.id),
        )?;
        node.remove_evidence(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::core::error::DradisError;
    use crate::core::links::ProjectRef;
    use crate::core::transport::{Method, RequestBody};
    use serde_json::json;

    const EVIDENCE: &str = r##"{
        "id": 31, "content": "#[Port]#\r\n443/tcp\r\n\r\n",
        "fields": {"Port": "443/tcp"},
        "issue": {"id": 11, "title": "Weak TLS", "url": ""}
    }"##;

    fn wired_node() -> Node {
        let mut node = Node {
            id: 7,
            label: "10.0.0.1".to_string(),
            ..Default::default()
        };
        node.attach(ProjectRef { id: 3 });
        node
    }

    fn issue() -> Issue {
        Issue {
            id: 11,
            title: "Weak TLS".to_string(),
            ..Default::default()
        }
    }

    fn port_fields() -> OrderedFieldMap {
        let mut fields = OrderedFieldMap::new();
        fields.set("Port", "443/tcp");
        fields
    }

    #[test]
    fn test_create_evidence_appends_wired_entry() {
        let transport = ScriptedTransport::new().reply(201, EVIDENCE);
        let client = DradisClient::with_transport(&transport);
        let mut node = wired_node();

        let evidence = client
            .create_evidence(&mut node, &issue(), &port_fields())
            .unwrap();

        assert_eq!(evidence.id, 31);
        assert_eq!(evidence.node, Some(node.to_ref()));
        assert_eq!(node.evidence.len(), 1);
        assert!(node.is_wired());

        let request = transport.last_request();
        assert_eq!(request.path, "nodes/7/evidence");
        assert_eq!(request.project_id, Some(3));
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"evidence": {
                "content": "#[Port]#\r\n443/tcp\r\n\r\n",
                "issue_id": "11"
            }}))
        );
    }

    #[test]
    fn test_failed_create_leaves_node_unchanged() {
        let transport = ScriptedTransport::new().reply(422, r#"{"message": "invalid"}"#);
        let client = DradisClient::with_transport(&transport);
        let mut node = wired_node();

        let err = client
            .create_evidence(&mut node, &issue(), &port_fields())
            .unwrap_err();
        assert!(matches!(err, DradisError::UnexpectedStatus { status: 422, .. }));
        assert!(node.evidence.is_empty());
    }

    #[test]
    fn test_fetched_evidence_points_at_node() {
        let list = format!("[{}]", EVIDENCE);
        let transport = ScriptedTransport::new().reply(200, &list).reply(200, EVIDENCE);
        let client = DradisClient::with_transport(&transport);
        let node = wired_node();

        let all = client.evidence(&node).unwrap();
        assert_eq!(all[0].node, Some(node.to_ref()));

        let one = client.evidence_by_id(&node, 31).unwrap();
        assert_eq!(one.node, Some(node.to_ref()));
        assert_eq!(transport.last_request().path, "nodes/7/evidence/31");
    }

    #[test]
    fn test_update_evidence_in_node_list() {
        let transport = ScriptedTransport::new()
            .reply(201, EVIDENCE)
            .reply(200, r##"{"id": 31, "content": "#[Port]#\r\n995/tcp\r\n\r\n",
                           "fields": {"Port": "995/tcp"}, "issue": {"id": 12, "title": "Other"}}"##);
        let client = DradisClient::with_transport(&transport);
        let mut node = wired_node();
        client
            .create_evidence(&mut node, &issue(), &port_fields())
            .unwrap();

        let evidence = node.evidence_by_id_mut(31).unwrap();
        let mut fields = evidence.copy_fields();
        fields.set("Port", "995/tcp");
        let other = Issue {
            id: 12,
            ..Default::default()
        };
        client
            .update_evidence(evidence, &EvidenceUpdate::from_fields(&fields).with_issue(&other))
            .unwrap();

        assert_eq!(node.evidence[0].field("Port").unwrap(), "995/tcp");
        assert_eq!(node.evidence[0].issue.id, 12);
        assert!(node.is_wired());

        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"evidence": {
                "content": "#[Port]#\r\n995/tcp\r\n\r\n",
                "issue_id": "12"
            }}))
        );
    }

    #[test]
    fn test_update_without_issue_omits_issue_id() {
        let transport = ScriptedTransport::new().reply(200, EVIDENCE);
        let client = DradisClient::with_transport(&transport);
        let node = wired_node();
        let mut evidence = Evidence {
            id: 31,
            node: Some(node.to_ref()),
            ..Default::default()
        };

        client
            .update_evidence(&mut evidence, &EvidenceUpdate::from_text("x"))
            .unwrap();
        assert_eq!(
            transport.last_request().body,
            RequestBody::Json(json!({"evidence": {"content": "x"}}))
        );
    }

    #[test]
    fn test_delete_evidence_removes_only_after_success() {
        let transport = ScriptedTransport::new()
            .reply(201, EVIDENCE)
            .reply(500, "")
            .reply(200, "");
        let client = DradisClient::with_transport(&transport);
        let mut node = wired_node();
        client
            .create_evidence(&mut node, &issue(), &port_fields())
            .unwrap();

        assert!(client.delete_evidence(&mut node, 31).is_err());
        assert_eq!(node.evidence.len(), 1);

        client.delete_evidence(&mut node, 31).unwrap();
        assert!(node.evidence.is_empty());
        assert_eq!(transport.last_request().path, "nodes/7/evidence/31");
    }

    #[test]
    fn test_detached_node_is_rejected() {
        let transport = ScriptedTransport::new();
        let client = DradisClient::with_transport(&transport);
        let mut node = Node {
            id: 7,
            ..Default::default()
        };

        assert!(matches!(
            client.create_evidence(&mut node, &issue(), &port_fields()),
            Err(DradisError::Detached { .. })
        ));
        assert!(transport.requests().is_empty());
    }
}

//! Projects endpoint

use serde::Serialize;

use super::{envelope, DradisClient};
use crate::core::entity::find_by_name;
use crate::core::error::{DradisError, Result};
use crate::core::transport::{ApiRequest, Transport};
use crate::entities::Project;

/// Fields for creating or updating a project. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Owning team (the API still calls teams "clients" in responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,

    /// Default report template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_template_properties_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<u64>>,

    /// Project template name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl ProjectParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for a new project; name and team are required by the server
    pub fn create(name: impl Into<String>, team_id: u64) -> Self {
        Self::new().name(name).team(team_id)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn team(mut self, team_id: u64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn report_template(mut self, id: u64) -> Self {
        self.report_template_properties_id = Some(id);
        self
    }

    pub fn authors(mut self, author_ids: Vec<u64>) -> Self {
        self.author_ids = Some(author_ids);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl<T: Transport> DradisClient<T> {
    /// All projects visible to the API user
    pub fn projects(&self) -> Result<Vec<Project>> {
        self.fetch("list projects", "project list", ApiRequest::get("projects"))
    }

    pub fn project(&self, id: u64) -> Result<Project> {
        self.fetch(
            "get project",
            "project",
            ApiRequest::get(format!("projects/{}", id)),
        )
    }

    /// First project whose name matches, ignoring case. Fetches the full list.
    pub fn project_by_name(&self, name: &str) -> Result<Project> {
        find_by_name(self.projects()?, name)
    }

    pub fn create_project(&self, params: &ProjectParams) -> Result<Project> {
        if params.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            return Err(DradisError::EmptyField("project name"));
        }
        let body = envelope("project", params)?;
        self.fetch(
            "create project",
            "project",
            ApiRequest::post("projects", body),
        )
    }

    /// Update a project, replacing the local copy with the server's answer
    pub fn update_project(&self, project: &mut Project, params: &ProjectParams) -> Result<()> {
        let body = envelope("project", params)?;
        *project = self.fetch(
            "update project",
            "project",
            ApiRequest::put(format!("projects/{}", project.id), body),
        )?;
        Ok(())
    }

    pub fn delete_project(&self, project: &Project) -> Result<()> {
        self.execute(
            "delete project",
            ApiRequest::delete(format!("projects/{}", project.id)),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::core::transport::{Method, RequestBody};
    use serde_json::json;

    const PROJECTS: &str = r#"[
        {"id": 1, "name": "Internal Audit", "client": {"id": 1, "name": "ACME"}, "authors": [], "owners": []},
        {"id": 2, "name": "External Pentest", "client": null, "authors": [], "owners": []}
    ]"#;

    #[test]
    fn test_project_by_name_ignores_case() {
        let transport = ScriptedTransport::new().reply(200, PROJECTS);
        let client = DradisClient::with_transport(&transport);

        let project = client.project_by_name("external PENTEST").unwrap();
        assert_eq!(project.id, 2);
        assert_eq!(transport.last_request().path, "projects");
    }

    #[test]
    fn test_project_by_name_not_found() {
        let transport = ScriptedTransport::new().reply(200, PROJECTS);
        let client = DradisClient::with_transport(&transport);

        let err = client.project_by_name("External").unwrap_err();
        assert!(matches!(err, DradisError::NotFound { kind: "project", .. }));
    }

    #[test]
    fn test_project_list_failure() {
        let transport = ScriptedTransport::new().reply(500, "oops");
        let client = DradisClient::with_transport(&transport);
        assert!(matches!(
            client.projects(),
            Err(DradisError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[test]
    fn test_create_project_sends_only_present_fields() {
        let transport =
            ScriptedTransport::new().reply(201, r#"{"id": 9, "name": "New", "authors": [], "owners": []}"#);
        let client = DradisClient::with_transport(&transport);

        let params = ProjectParams::create("New", 4).authors(vec![3, 5]);
        let project = client.create_project(&params).unwrap();
        assert_eq!(project.id, 9);

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"project": {"name": "New", "team_id": 4, "author_ids": [3, 5]}}))
        );
    }

    #[test]
    fn test_create_project_requires_name() {
        let transport = ScriptedTransport::new();
        let client = DradisClient::with_transport(&transport);

        let err = client.create_project(&ProjectParams::new().team(1)).unwrap_err();
        assert!(matches!(err, DradisError::EmptyField(_)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_update_project_in_place() {
        let transport = ScriptedTransport::new()
            .reply(200, r#"{"id": 9, "name": "Renamed", "authors": [], "owners": []}"#);
        let client = DradisClient::with_transport(&transport);

        let mut project = Project {
            id: 9,
            name: "Old".to_string(),
            ..Default::default()
        };
        client
            .update_project(&mut project, &ProjectParams::new().name("Renamed"))
            .unwrap();

        assert_eq!(project.name, "Renamed");
        let request = transport.last_request();
        assert_eq!(request.path, "projects/9");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"project": {"name": "Renamed"}}))
        );
    }

    #[test]
    fn test_delete_project() {
        let transport = ScriptedTransport::new().reply(200, "").reply(404, "");
        let client = DradisClient::with_transport(&transport);
        let project = Project {
            id: 3,
            ..Default::default()
        };

        assert!(client.delete_project(&project).is_ok());
        assert!(client.delete_project(&project).is_err());
        assert_eq!(transport.last_request().method, Method::Delete);
    }
}

//! Issues endpoint (project scoped)

use serde_json::json;

use super::DradisClient;
use crate::core::codec::encode_fields;
use crate::core::entity::find_by_name;
use crate::core::error::Result;
use crate::core::fields::OrderedFieldMap;
use crate::core::links::require_project;
use crate::core::transport::{ApiRequest, Transport};
use crate::entities::{Issue, Project};

impl<T: Transport> DradisClient<T> {
    pub fn issues(&self, project: &Project) -> Result<Vec<Issue>> {
        let mut issues: Vec<Issue> = self.fetch(
            "list issues",
            "issue list",
            ApiRequest::get("issues").in_project(project.id),
        )?;
        for issue in &mut issues {
            issue.project = Some(project.to_ref());
        }
        Ok(issues)
    }

    pub fn issue(&self, project: &Project, id: u64) -> Result<Issue> {
        let mut issue: Issue = self.fetch(
            "get issue",
            "issue",
            ApiRequest::get(format!("issues/{}", id)).in_project(project.id),
        )?;
        issue.project = Some(project.to_ref());
        Ok(issue)
    }

    /// First issue whose title matches, ignoring case
    pub fn issue_by_title(&self, project: &Project, title: &str) -> Result<Issue> {
        find_by_name(self.issues(project)?, title)
    }

    /// Create an issue from fields, encoded in insertion order
    pub fn create_issue(&self, project: &Project, fields: &OrderedFieldMap) -> Result<Issue> {
        self.create_issue_from_text(project, &encode_fields(fields))
    }

    pub fn create_issue_from_text(&self, project: &Project, text: &str) -> Result<Issue> {
        let mut issue: Issue = self.fetch(
            "create issue",
            "issue",
            ApiRequest::post("issues", json!({ "issue": { "text": text } })).in_project(project.id),
        )?;
        issue.project = Some(project.to_ref());
        Ok(issue)
    }

    pub fn update_issue(&self, issue: &mut Issue, fields: &OrderedFieldMap) -> Result<()> {
        self.update_issue_from_text(issue, &encode_fields(fields))
    }

    /// Replace the issue text, then the local copy with the server's answer
    pub fn update_issue_from_text(&self, issue: &mut Issue, text: &str) -> Result<()> {
        let project = require_project(issue.project, "issue")?;
        let mut updated: Issue = self.fetch(
            "update issue",
            "issue",
            ApiRequest::put(
                format!("issues/{}", issue.id),
                json!({ "issue": { "text": text } }),
            )
            .in_project(project.id),
        )?;
        updated.project = Some(project);
        *issue = updated;
        Ok(())
    }

    pub fn delete_issue(&self, issue: &Issue) -> Result<()> {
        let project = require_project(issue.project, "issue")?;
        self.execute(
            "delete issue",
            ApiRequest::delete(format!("issues/{}", issue.id)).in_project(project.id),
        )?;
        Ok(())
    }
}

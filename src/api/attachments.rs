//! Attachments endpoint (node scoped)

use std::path::Path;

use super::DradisClient;
use crate::core::error::{DradisError, Result};
use crate::core::links::{require_node, require_project};
use crate::core::transport::{escape_segment, ApiRequest, Method, RequestBody, Transport, UploadPart};
use crate::entities::{Attachment, Node};

impl<T: Transport> DradisClient<T> {
    pub fn attachments(&self, node: &Node) -> Result<Vec<Attachment>> {
        let project = require_project(node.project, "node")?;
        let mut attachments: Vec<Attachment> = self.fetch(
            "list attachments",
            "attachment list",
            ApiRequest::get(format!("nodes/{}/attachments", node.id)).in_project(project.id),
        )?;
        for attachment in &mut attachments {
            attachment.node = Some(node.to_ref());
        }
        Ok(attachments)
    }

    pub fn attachment(&self, node: &Node, filename: &str) -> Result<Attachment> {
        let project = require_project(node.project, "node")?;
        let mut attachment: Attachment = self.fetch(
            "get attachment",
            "attachment",
            ApiRequest::get(format!(
                "nodes/{}/attachments/{}",
                node.id,
                escape_segment(filename)
            ))
            .in_project(project.id),
        )?;
        attachment.node = Some(node.to_ref());
        Ok(attachment)
    }

    /// Upload local files in one multipart request
    pub fn upload_attachments<P: AsRef<Path>>(
        &self,
        node: &Node,
        paths: &[P],
    ) -> Result<Vec<Attachment>> {
        let project = require_project(node.project, "node")?;
        let parts = paths
            .iter()
            .map(|path| read_part(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(node = node.id, files = parts.len(), "uploading attachments");

        let mut attachments: Vec<Attachment> = self.fetch(
            "upload attachments",
            "attachment list",
            ApiRequest::new(Method::Post, format!("nodes/{}/attachments", node.id))
                .in_project(project.id)
                .with_body(RequestBody::Multipart(parts)),
        )?;
        for attachment in &mut attachments {
            attachment.node = Some(node.to_ref());
        }
        Ok(attachments)
    }

    pub fn delete_attachment(&self, attachment: &Attachment) -> Result<()> {
        let (project_id, node_id) = require_node(attachment.node, "attachment")?;
        self.execute(
            "delete attachment",
            ApiRequest::delete(format!(
                "nodes/{}/attachments/{}",
                node_id,
                escape_segment(&attachment.filename)
            ))
            .in_project(project_id),
        )?;
        Ok(())
    }
}

fn read_part(path: &Path) -> Result<UploadPart> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| DradisError::not_found("file", path.display()))?;
    Ok(UploadPart {
        filename,
        content: std::fs::read(path)?,
    })
}

//! Notes endpoint (node scoped)

use serde::Serialize;

use super::{envelope, DradisClient};
use crate::core::codec::encode_fields;
use crate::core::entity::find_by_name;
use crate::core::error::Result;
use crate::core::fields::OrderedFieldMap;
use crate::core::links::{require_node, require_project};
use crate::core::transport::{ApiRequest, Transport};
use crate::entities::{Node, Note, DEFAULT_NOTE_CATEGORY};

/// Replacement text for an existing note, optionally moving it to another category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteUpdate {
    pub text: String,
    pub category_id: Option<u64>,
}

impl NoteUpdate {
    pub fn from_fields(fields: &OrderedFieldMap) -> Self {
        Self::from_text(encode_fields(fields))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Wire shape; categories travel as strings
#[derive(Serialize)]
struct NotePayload<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
}

impl<T: Transport> DradisClient<T> {
    pub fn notes(&self, node: &Node) -> Result<Vec<Note>> {
        let project = require_project(node.project, "node")?;
        let mut notes: Vec<Note> = self.fetch(
            "list notes",
            "note list",
            ApiRequest::get(format!("nodes/{}/notes", node.id)).in_project(project.id),
        )?;
        let node_ref = node.to_ref();
        for note in &mut notes {
            note.node = Some(node_ref);
        }
        Ok(notes)
    }

    pub fn note(&self, node: &Node, id: u64) -> Result<Note> {
        let project = require_project(node.project, "node")?;
        let mut note: Note = self.fetch(
            "get note",
            "note",
            ApiRequest::get(format!("nodes/{}/notes/{}", node.id, id)).in_project(project.id),
        )?;
        note.node = Some(node.to_ref());
        Ok(note)
    }

    /// First note on the server whose title matches, ignoring case
    pub fn note_by_title(&self, node: &Node, title: &str) -> Result<Note> {
        find_by_name(self.notes(node)?, title)
    }

    /// Create a note; without a category it is filed under the default one
    pub fn create_note(
        &self,
        node: &mut Node,
        fields: &OrderedFieldMap,
        category_id: Option<u64>,
    ) -> Result<Note> {
        self.create_note_from_text(node, &encode_fields(fields), category_id)
    }

    pub fn create_note_from_text(
        &self,
        node: &mut Node,
        text: &str,
        category_id: Option<u64>,
    ) -> Result<Note> {
        let project = require_project(node.project, "node")?;
        let payload = NotePayload {
            text,
            category_id: Some(category_id.unwrap_or(DEFAULT_NOTE_CATEGORY).to_string()),
        };
        let mut note: Note = self.fetch(
            "create note",
            "note",
            ApiRequest::post(
                format!("nodes/{}/notes", node.id),
                envelope("note", &payload)?,
            )
            .in_project(project.id),
        )?;
        note.node = Some(node.to_ref());
        node.add_note(note.clone());
        Ok(note)
    }

    pub fn update_note(&self, note: &mut Note, update: &NoteUpdate) -> Result<()> {
        let (project_id, node_id) = require_node(note.node, "note")?;
        let payload = NotePayload {
            text: &update.text,
            category_id: update.category_id.map(|id| id.to_string()),
        };
        let mut updated: Note = self.fetch(
            "update note",
            "note",
            ApiRequest::put(
                format!("nodes/{}/notes/{}", node_id, note.id),
                envelope("note", &payload)?,
            )
            .in_project(project_id),
        )?;
        updated.node = note.node;
        *note = updated;
        Ok(())
    }

    /// Delete a note on the server, then drop it from the node's list
    pub fn delete_note(&self, node: &mut Node, id: u64) -> Result<()> {
        let project = require_project(node.project, "node")?;
        self.execute(
            "delete note",
            ApiRequest::delete(format!("nodes/{}/notes/{}", node.id, id)).in_project(project.id),
        )?;
        node.remove_note(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::core::links::ProjectRef;
    use crate::core::transport::RequestBody;
    use serde_json::json;

    const NOTE: &str = r##"{
        "id": 41, "category_id": 6, "title": "Recon",
        "fields": {"Title": "Recon", "Hostnames": "foo.com"},
        "text": "#[Title]#\r\nRecon\r\n\r\n#[Hostnames]#\r\nfoo.com\r\n\r\n"
    }"##;

    fn wired_node() -> Node {
        let mut node = Node {
            id: 7,
            ..Default::default()
        };
        node.attach(ProjectRef { id: 3 });
        node
    }

    #[test]
    fn test_create_note_defaults_category() {
        let transport = ScriptedTransport::new().reply(201, NOTE);
        let client = DradisClient::with_transport(&transport);
        let mut node = wired_node();

        let note = client
            .create_note_from_text(&mut node, "#[Title]#\r\nRecon", None)
            .unwrap();
        assert_eq!(note.node, Some(node.to_ref()));
        assert_eq!(node.notes.len(), 1);
        assert!(node.is_wired());

        let request = transport.last_request();
        assert_eq!(request.path, "nodes/7/notes");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"note": {"text": "#[Title]#\r\nRecon", "category_id": "6"}}))
        );
    }

    #[test]
    fn test_create_note_with_category() {
        let transport = ScriptedTransport::new().reply(201, NOTE);
        let client = DradisClient::with_transport(&transport);
        let mut node = wired_node();

        let mut fields = OrderedFieldMap::new();
        fields.set("Title", "Recon");
        client.create_note(&mut node, &fields, Some(2)).unwrap();

        assert_eq!(
            transport.last_request().body,
            RequestBody::Json(json!({"note": {"text": "#[Title]#\r\nRecon\r\n\r\n", "category_id": "2"}}))
        );
    }

    #[test]
    fn test_failed_create_note_leaves_node_unchanged() {
        let transport = ScriptedTransport::new().reply(200, NOTE);
        let client = DradisClient::with_transport(&transport);
        let mut node = wired_node();

        assert!(client.create_note_from_text(&mut node, "x", None).is_err());
        assert!(node.notes.is_empty());
    }

    #[test]
    fn test_note_by_title() {
        let list = format!("[{}]", NOTE);
        let transport = ScriptedTransport::new().reply(200, &list);
        let client = DradisClient::with_transport(&transport);
        let node = wired_node();

        let note = client.note_by_title(&node, "RECON").unwrap();
        assert_eq!(note.field("Hostnames").unwrap(), "foo.com");
        assert_eq!(note.node, Some(node.to_ref()));
    }

    #[test]
    fn test_update_note_omits_unchanged_category() {
        let transport = ScriptedTransport::new().reply(200, NOTE);
        let client = DradisClient::with_transport(&transport);
        let node = wired_node();
        let mut note = Note {
            id: 41,
            node: Some(node.to_ref()),
            ..Default::default()
        };

        client
            .update_note(&mut note, &NoteUpdate::from_text("#[Title]#\r\nRecon"))
            .unwrap();

        assert_eq!(note.title, "Recon");
        assert_eq!(note.node, Some(node.to_ref()));
        let request = transport.last_request();
        assert_eq!(request.path, "nodes/7/notes/41");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"note": {"text": "#[Title]#\r\nRecon"}}))
        );
    }

    #[test]
    fn test_delete_note() {
        let transport = ScriptedTransport::new().reply(201, NOTE).reply(200, "");
        let client = DradisClient::with_transport(&transport);
        let mut node = wired_node();
        client.create_note_from_text(&mut node, "x", None).unwrap();

        client.delete_note(&mut node, 41).unwrap();
        assert!(node.notes.is_empty());
    }
}

//! Dradis: client for the Dradis Pro REST API
//!
//! Projects, teams, nodes, issues, evidence, notes, attachments and issue
//! library entries are fetched into plain local values. Evidence and notes
//! are owned by their node and point back at it; nodes and issues point
//! back at their project. [`DradisClient`] keeps that wiring intact across
//! every fetch, create, update and delete.
//!
//! ```no_run
//! use dradis::{Config, DradisClient, OrderedFieldMap};
//!
//! # fn main() -> dradis::Result<()> {
//! let client = DradisClient::from_config(&Config::load())?;
//! let project = client.project_by_name("External Pentest")?;
//! let mut node = client.node_by_label(&project, "10.0.0.1")?;
//! let issue = client.issue_by_title(&project, "Weak TLS")?;
//!
//! let mut fields = OrderedFieldMap::new();
//! fields.set("Port", "443/tcp");
//! client.create_evidence(&mut node, &issue, &fields)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod entities;

pub use api::{DradisClient, EvidenceUpdate, NodeParams, NoteUpdate, ProjectParams, TeamParams};
pub use crate::core::{Config, DradisError, OrderedFieldMap, Result};

//! Issue library add-on endpoint

use super::DradisClient;
use crate::core::error::Result;
use crate::core::transport::{ApiRequest, Transport};
use crate::entities::IssueLibEntry;

const ENTRIES: &str = "addons/issuelib/entries";

impl<T: Transport> DradisClient<T> {
    pub fn issue_library(&self) -> Result<Vec<IssueLibEntry>> {
        self.fetch("list issue library", "issue library", ApiRequest::get(ENTRIES))
    }

    pub fn issue_library_entry(&self, id: u64) -> Result<IssueLibEntry> {
        self.fetch(
            "get issue library entry",
            "issue library entry",
            ApiRequest::get(format!("{}/{}", ENTRIES, id)),
        )
    }

    pub fn delete_issue_library_entry(&self, entry: &IssueLibEntry) -> Result<()> {
        self.execute(
            "delete issue library entry",
            ApiRequest::delete(format!("{}/{}", ENTRIES, entry.id)),
        )?;
        Ok(())
    }
}

//! Teams endpoint

use chrono::NaiveDate;
use serde::Serialize;

use super::{envelope, DradisClient};
use crate::core::entity::find_by_name;
use crate::core::error::{DradisError, Result};
use crate::core::transport::{ApiRequest, Transport};
use crate::entities::Team;

/// Fields for creating or updating a team. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_since: Option<NaiveDate>,
}

impl TeamParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.team_since = Some(date);
        self
    }
}

impl<T: Transport> DradisClient<T> {
    pub fn teams(&self) -> Result<Vec<Team>> {
        self.fetch("list teams", "team list", ApiRequest::get("teams"))
    }

    pub fn team(&self, id: u64) -> Result<Team> {
        self.fetch("get team", "team", ApiRequest::get(format!("teams/{}", id)))
    }

    /// First team whose name matches, ignoring case
    pub fn team_by_name(&self, name: &str) -> Result<Team> {
        find_by_name(self.teams()?, name)
    }

    pub fn create_team(&self, params: &TeamParams) -> Result<Team> {
        if params.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            return Err(DradisError::EmptyField("team name"));
        }
        let body = envelope("team", params)?;
        self.fetch("create team", "team", ApiRequest::post("teams", body))
    }

    pub fn update_team(&self, team: &mut Team, params: &TeamParams) -> Result<()> {
        let body = envelope("team", params)?;
        *team = self.fetch(
            "update team",
            "team",
            ApiRequest::put(format!("teams/{}", team.id), body),
        )?;
        Ok(())
    }

    pub fn delete_team(&self, team: &Team) -> Result<()> {
        self.execute(
            "delete team",
            ApiRequest::delete(format!("teams/{}", team.id)),
        )?;
        Ok(())
    }
}

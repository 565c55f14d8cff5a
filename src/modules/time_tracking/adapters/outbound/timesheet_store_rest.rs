// HTTP client for a remote time-entry storage API.
//
// POST {base}/timesheets answers `{ "success": bool, "error"?: string }`.
// GET  {base}/timesheets?user_id=... answers a JSON array of stored entries.

use crate::modules::time_tracking::adapters::outbound::timesheet_store::{
    TimesheetStore, TimesheetStoreError,
};
use crate::modules::time_tracking::core::timesheet_entry::TimesheetEntry;
use crate::modules::time_tracking::use_cases::list_timesheet_entries::queries_port::{
    TimesheetEntryView, TimesheetQueries,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct CreateTimesheetResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RestTimesheetStore {
    client: Client,
    base_url: String,
}

impl RestTimesheetStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Every request, body included, fails once `timeout` has elapsed.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn timesheets_url(&self) -> String {
        format!("{}/timesheets", self.base_url)
    }
}

#[async_trait]
impl TimesheetStore for RestTimesheetStore {
    async fn create_timesheet_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<(), TimesheetStoreError> {
        let response = self
            .client
            .post(self.timesheets_url())
            .json(entry)
            .send()
            .await
            .map_err(|err| TimesheetStoreError::Backend(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TimesheetStoreError::Backend(err.to_string()))?;

        let answered = || format!("storage answered {status}");
        match serde_json::from_str::<CreateTimesheetResponse>(&body) {
            Ok(CreateTimesheetResponse { success: true, .. }) if status.is_success() => Ok(()),
            Ok(CreateTimesheetResponse { error, .. })
                if status.is_client_error() || status.is_success() =>
            {
                Err(TimesheetStoreError::Rejected(error.unwrap_or_else(answered)))
            }
            Ok(CreateTimesheetResponse { error, .. }) => {
                Err(TimesheetStoreError::Backend(error.unwrap_or_else(answered)))
            }
            Err(_) if status.is_client_error() => Err(TimesheetStoreError::Rejected(answered())),
            Err(_) => Err(TimesheetStoreError::Backend(format!(
                "unexpected response ({status}): {body}"
            ))),
        }
    }
}

#[async_trait]
impl TimesheetQueries for RestTimesheetStore {
    async fn list_by_user_id(
        &self,
        user_id: &str,
        offset: u64,
        limit: u64,
        sort_by_date_desc: bool,
    ) -> anyhow::Result<Vec<TimesheetEntryView>> {
        let order = if sort_by_date_desc { "desc" } else { "asc" };
        let rows = self
            .client
            .get(self.timesheets_url())
            .query(&[
                ("user_id", user_id.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
                ("order", order.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<TimesheetEntryView>>()
            .await?;
        Ok(rows)
    }
}

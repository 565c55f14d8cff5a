use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A timesheet entry as stored, with the identifier assigned by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntryView {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    pub date: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[async_trait]
pub trait TimesheetQueries: Send + Sync {
    async fn list_by_user_id(
        &self,
        user_id: &str,
        offset: u64,
        limit: u64,
        sort_by_date_desc: bool,
    ) -> anyhow::Result<Vec<TimesheetEntryView>>;
}

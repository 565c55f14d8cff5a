use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::time_tracking::use_cases::list_timesheet_entries::queries_port::TimesheetEntryView;
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlTimesheetEntry {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub task_id: Option<String>,
    pub date: String,
    pub hours: f64,
    pub description: Option<String>,
}

impl From<TimesheetEntryView> for GqlTimesheetEntry {
    fn from(v: TimesheetEntryView) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            project_id: v.project_id,
            task_id: v.task_id,
            date: v.date.to_string(),
            hours: v.hours,
            description: v.description,
        }
    }
}

#[derive(Default)]
pub struct TimesheetEntriesQuery;

#[Object]
impl TimesheetEntriesQuery {
    async fn timesheet_entries(
        &self,
        context: &Context<'_>,
        user_id: String,
        offset: Option<i64>,
        limit: Option<i64>,
        sort_desc: Option<bool>,
    ) -> GqlResult<Vec<GqlTimesheetEntry>> {
        let state = context.data_unchecked::<AppState>();
        let list = state
            .queries
            .list_by_user_id(
                &user_id,
                offset.unwrap_or(0).max(0) as u64,
                limit.unwrap_or(20).max(0) as u64,
                sort_desc.unwrap_or(true),
            )
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

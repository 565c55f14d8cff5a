use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::modules::time_tracking::use_cases::list_timesheet_entries::inbound::graphql::TimesheetEntriesQuery;
use crate::modules::time_tracking::use_cases::track_time::inbound::graphql::TimerQuery;
pub use crate::modules::time_tracking::use_cases::track_time::inbound::graphql::MutationRoot;
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(TimerQuery, TimesheetEntriesQuery);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

use crate::modules::time_tracking::adapters::outbound::timesheet_store::TimesheetStore;
use crate::modules::time_tracking::use_cases::list_timesheet_entries::queries_port::TimesheetQueries;
use crate::modules::time_tracking::use_cases::track_time::registry::TimerRegistry;
use crate::shared::core::clock::Clock;
use std::sync::Arc;

pub type Timers = TimerRegistry<dyn Clock, dyn TimesheetStore>;

#[derive(Clone)]
pub struct AppState {
    pub timers: Arc<Timers>,
    pub queries: Arc<dyn TimesheetQueries>,
}

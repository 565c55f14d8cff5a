use crate::modules::time_tracking::adapters::outbound::timesheet_store::TimesheetStore;
use crate::modules::time_tracking::adapters::outbound::timesheet_store_in_memory::InMemoryTimesheetStore;
use crate::modules::time_tracking::use_cases::track_time::handler::TrackerSettings;
use crate::modules::time_tracking::use_cases::track_time::observer::NoopObserver;
use crate::modules::time_tracking::use_cases::track_time::registry::TimerRegistry;
use crate::shared::core::clock::{Clock, EntryDateConvention};
use crate::shell::state::AppState;
use crate::tests::fixtures::clock::ManualClock;
use std::sync::Arc;

/// Application state backed by the given clock and in memory store.
pub fn make_test_state(clock: Arc<ManualClock>, store: Arc<InMemoryTimesheetStore>) -> AppState {
    let settings = TrackerSettings {
        date_convention: EntryDateConvention::Utc,
        ..TrackerSettings::default()
    };
    let clock: Arc<dyn Clock> = clock;
    let timesheets: Arc<dyn TimesheetStore> = store.clone();
    let timers = Arc::new(TimerRegistry::new(
        clock,
        timesheets,
        Arc::new(NoopObserver),
        settings,
    ));
    AppState {
        timers,
        queries: store,
    }
}

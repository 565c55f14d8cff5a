use crate::modules::time_tracking::core::events::{TimerStarted, TimerStopped, TimesheetSaved};
use crate::modules::time_tracking::use_cases::track_time::observer::TimerObserver;
use tracing::{debug, info};

/// Writes every timer hook to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TimerObserver for TracingObserver {
    fn on_start(&self, event: &TimerStarted) {
        info!(
            project_id = %event.project_id,
            task_id = ?event.task_id,
            start_time_ms = event.start_time_ms,
            "timer started"
        );
    }

    fn on_tick(&self, elapsed_seconds: u64) {
        debug!(elapsed_seconds, "timer tick");
    }

    fn on_stop(&self, event: &TimerStopped) {
        info!(
            project_id = %event.project_id,
            task_id = ?event.task_id,
            elapsed_seconds = event.elapsed_seconds,
            hours = event.hours,
            "timer stopped"
        );
    }

    fn on_save(&self, event: &TimesheetSaved) {
        info!(
            project_id = %event.project_id,
            task_id = ?event.task_id,
            hours = event.hours,
            "timesheet saved"
        );
    }
}

// A finalized timer duration waiting to become a timesheet entry.

use crate::modules::time_tracking::core::session::TimedSubject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTimesheetEntry {
    pub user_id: String,
    pub subject: TimedSubject,
    pub elapsed_seconds: u64,
    pub description: Option<String>,
    /// Wall-clock reading at the moment the timer stopped.
    pub stopped_at_ms: i64,
}

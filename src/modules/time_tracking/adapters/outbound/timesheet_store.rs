use crate::modules::time_tracking::core::timesheet_entry::TimesheetEntry;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimesheetStoreError {
    /// The storage answered but refused the entry (validation, permissions).
    #[error("timesheet entry rejected: {0}")]
    Rejected(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Outbound port towards the time-entry storage collaborator.
#[async_trait]
pub trait TimesheetStore: Send + Sync {
    async fn create_timesheet_entry(&self, entry: &TimesheetEntry)
    -> Result<(), TimesheetStoreError>;
}

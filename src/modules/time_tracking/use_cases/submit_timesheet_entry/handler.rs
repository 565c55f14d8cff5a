// Persistence bridge: decide, then hand the entry to the storage collaborator.
//
// One outbound call per submission. No retry and no local caching happen here;
// callers decide what to do with a failure.

use crate::modules::time_tracking::adapters::outbound::timesheet_store::{
    TimesheetStore, TimesheetStoreError,
};
use crate::modules::time_tracking::core::timesheet_entry::TimesheetEntry;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::command::SubmitTimesheetEntry;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::decide::decide_submission;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::decision::Decision;
use crate::shared::core::clock::EntryDateConvention;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SubmitTimesheetEntryHandler<TStore>
where
    TStore: TimesheetStore + ?Sized + 'static,
{
    store: Arc<TStore>,
    date_convention: EntryDateConvention,
}

impl<TStore> SubmitTimesheetEntryHandler<TStore>
where
    TStore: TimesheetStore + ?Sized + 'static,
{
    pub fn new(store: Arc<TStore>, date_convention: EntryDateConvention) -> Self {
        Self {
            store,
            date_convention,
        }
    }

    pub fn decide(&self, command: SubmitTimesheetEntry) -> Decision {
        decide_submission(command, self.date_convention)
    }

    /// One outbound create call; the caller keeps the entry on failure.
    pub async fn submit(&self, entry: &TimesheetEntry) -> Result<(), TimesheetStoreError> {
        match self.store.create_timesheet_entry(entry).await {
            Ok(()) => {
                info!(
                    user_id = %entry.user_id,
                    project_id = %entry.project_id,
                    hours = entry.hours,
                    date = %entry.date,
                    "timesheet entry submitted"
                );
                Ok(())
            }
            Err(error) => {
                warn!(
                    user_id = %entry.user_id,
                    project_id = %entry.project_id,
                    %error,
                    "timesheet entry submission failed"
                );
                Err(error)
            }
        }
    }
}

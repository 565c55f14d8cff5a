use crate::modules::time_tracking::core::timesheet_entry::TimesheetEntry;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("no time was tracked")]
    NothingTracked,

    #[error("{elapsed_seconds}s rounds to zero hours")]
    BelowHourResolution { elapsed_seconds: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Accepted { entry: TimesheetEntry },
    Rejected { reason: DecideError },
}

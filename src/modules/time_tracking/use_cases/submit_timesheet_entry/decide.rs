// Pure decision turning a finalized duration into a timesheet entry.
//
// Hours are rounded here, at the storage boundary, and nowhere else.

use crate::modules::time_tracking::core::timesheet_entry::TimesheetEntry;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::command::SubmitTimesheetEntry;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::decision::{
    DecideError, Decision,
};
use crate::shared::core::clock::{EntryDateConvention, calendar_date};

/// `seconds / 3600` rounded half away from zero to two decimals.
pub fn seconds_to_hours(elapsed_seconds: u64) -> f64 {
    let hundredths = (elapsed_seconds as f64 / 36.0).round();
    hundredths / 100.0
}

pub fn default_description(project_id: &str) -> String {
    format!("Timer entry for project {project_id}")
}

pub fn decide_submission(
    command: SubmitTimesheetEntry,
    date_convention: EntryDateConvention,
) -> Decision {
    if command.elapsed_seconds == 0 {
        return Decision::Rejected {
            reason: DecideError::NothingTracked,
        };
    }
    let hours = seconds_to_hours(command.elapsed_seconds);
    if hours <= 0.0 {
        return Decision::Rejected {
            reason: DecideError::BelowHourResolution {
                elapsed_seconds: command.elapsed_seconds,
            },
        };
    }

    let description = command
        .description
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| default_description(&command.subject.project_id));

    Decision::Accepted {
        entry: TimesheetEntry {
            user_id: command.user_id,
            project_id: command.subject.project_id,
            task_id: command.subject.task_id,
            date: calendar_date(command.stopped_at_ms, date_convention),
            hours,
            description: Some(description),
        },
    }
}

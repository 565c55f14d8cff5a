// Shared test fixture for the SubmitTimesheetEntry command, seeded from JSON.

use crate::modules::time_tracking::core::session::TimedSubject;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::command::SubmitTimesheetEntry;
use serde::Deserialize;

const FIXTURE: &str = include_str!("json/submit_timesheet_entry.json");

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTimesheetEntryDto {
    pub user_id: String,
    pub project_id: String,
    pub task_id: Option<String>,
    pub elapsed_seconds: u64,
    pub stopped_at_ms: i64,
}

pub struct SubmitTimesheetEntryBuilder {
    inner: SubmitTimesheetEntry,
}

impl Default for SubmitTimesheetEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl SubmitTimesheetEntryBuilder {
    pub fn new() -> Self {
        let dto: SubmitTimesheetEntryDto = serde_json::from_str(FIXTURE).unwrap();
        Self {
            inner: SubmitTimesheetEntry {
                user_id: dto.user_id,
                subject: TimedSubject::new(dto.project_id, dto.task_id),
                elapsed_seconds: dto.elapsed_seconds,
                description: None,
                stopped_at_ms: dto.stopped_at_ms,
            },
        }
    }

    pub fn user_id(mut self, v: impl Into<String>) -> Self {
        self.inner.user_id = v.into();
        self
    }

    pub fn project_id(mut self, v: impl Into<String>) -> Self {
        self.inner.subject.project_id = v.into();
        self
    }

    pub fn task_id(mut self, v: Option<String>) -> Self {
        self.inner.subject.task_id = v;
        self
    }

    pub fn elapsed_seconds(mut self, v: u64) -> Self {
        self.inner.elapsed_seconds = v;
        self
    }

    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.inner.description = Some(v.into());
        self
    }

    pub fn stopped_at_ms(mut self, v: i64) -> Self {
        self.inner.stopped_at_ms = v;
        self
    }

    pub fn build(self) -> SubmitTimesheetEntry {
        self.inner
    }
}

#[cfg(test)]
mod submit_timesheet_entry_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = SubmitTimesheetEntryBuilder::default().build();
        assert_eq!(built.user_id, "user-fixed-0001");
        assert_eq!(built.subject.project_id, "project-0001");
        assert_eq!(built.subject.task_id.as_deref(), Some("task-0001"));
        assert_eq!(built.elapsed_seconds, 125);
        assert_eq!(built.stopped_at_ms, 1_700_000_000_000);
        assert_eq!(built.description, None);
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = SubmitTimesheetEntryBuilder::new()
            .user_id("uid-456")
            .project_id("pid-789")
            .task_id(None)
            .elapsed_seconds(42)
            .description("desc")
            .stopped_at_ms(3_333)
            .build();

        assert_eq!(custom.user_id, "uid-456");
        assert_eq!(custom.subject, TimedSubject::new("pid-789", None));
        assert_eq!(custom.elapsed_seconds, 42);
        assert_eq!(custom.description.as_deref(), Some("desc"));
        assert_eq!(custom.stopped_at_ms, 3_333);
    }
}

// Timer state machine for one measured (project, task) pair.
//
// Pure: every transition receives the current wall-clock reading and reports
// what happened. Out-of-order calls are ignored, never errors.

use crate::modules::time_tracking::core::duration::whole_seconds_between;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedSubject {
    pub project_id: String,
    pub task_id: Option<String>,
}

impl TimedSubject {
    pub fn new(project_id: impl Into<String>, task_id: Option<String>) -> Self {
        Self {
            project_id: project_id.into(),
            task_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Started { start_time_ms: i64 },
    Paused { accumulated_seconds: u64 },
    Resumed { start_time_ms: i64 },
    Stopped { elapsed_seconds: u64 },
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSession {
    subject: TimedSubject,
    status: TimerStatus,
    /// Start of the current running interval; `Some` only while Running.
    running_since_ms: Option<i64>,
    /// Seconds carried over from earlier running intervals.
    accumulated_seconds: u64,
}

impl TimerSession {
    pub fn new(subject: TimedSubject) -> Self {
        Self {
            subject,
            status: TimerStatus::Idle,
            running_since_ms: None,
            accumulated_seconds: 0,
        }
    }

    pub fn subject(&self) -> &TimedSubject {
        &self.subject
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn accumulated_seconds(&self) -> u64 {
        self.accumulated_seconds
    }

    /// The instant elapsed time is measured from, shifted back by the time
    /// accumulated before the latest resume. `None` unless Running.
    pub fn start_instant_ms(&self) -> Option<i64> {
        self.running_since_ms.map(|since| {
            let accumulated_ms = i64::try_from(self.accumulated_seconds)
                .unwrap_or(i64::MAX)
                .saturating_mul(1_000);
            since.saturating_sub(accumulated_ms)
        })
    }

    pub fn elapsed(&self, now_ms: i64) -> u64 {
        match (self.status, self.running_since_ms) {
            (TimerStatus::Running, Some(since)) => self
                .accumulated_seconds
                .saturating_add(whole_seconds_between(since, now_ms)),
            _ => self.accumulated_seconds,
        }
    }

    pub fn start(&mut self, now_ms: i64) -> Transition {
        match self.status {
            TimerStatus::Idle => {
                self.status = TimerStatus::Running;
                self.running_since_ms = Some(now_ms);
                self.accumulated_seconds = 0;
                Transition::Started {
                    start_time_ms: now_ms,
                }
            }
            TimerStatus::Paused => self.resume(now_ms),
            TimerStatus::Running => Transition::Ignored,
        }
    }

    pub fn pause(&mut self, now_ms: i64) -> Transition {
        if self.status != TimerStatus::Running {
            return Transition::Ignored;
        }
        self.accumulated_seconds = self.elapsed(now_ms);
        self.running_since_ms = None;
        self.status = TimerStatus::Paused;
        Transition::Paused {
            accumulated_seconds: self.accumulated_seconds,
        }
    }

    pub fn resume(&mut self, now_ms: i64) -> Transition {
        match self.status {
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                self.running_since_ms = Some(now_ms);
                Transition::Resumed {
                    start_time_ms: self.start_instant_ms().unwrap_or(now_ms),
                }
            }
            TimerStatus::Idle => self.start(now_ms),
            TimerStatus::Running => Transition::Ignored,
        }
    }

    /// Finalizes the duration and resets to Idle. Stopping while Paused
    /// accrues nothing since the pause.
    pub fn stop(&mut self, now_ms: i64) -> Transition {
        if self.status == TimerStatus::Idle {
            return Transition::Ignored;
        }
        let elapsed_seconds = self.elapsed(now_ms);
        self.status = TimerStatus::Idle;
        self.running_since_ms = None;
        self.accumulated_seconds = 0;
        Transition::Stopped { elapsed_seconds }
    }
}

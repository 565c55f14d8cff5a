// Time tracker for one (project, task) session.
//
// Responsibilities
// - Drive the session state machine with fresh clock reads.
// - Keep the tick scheduler active exactly while the session is running.
// - On stop, queue the finalized entry in the same critical section that
//   resets the session, then submit it; entries leave the queue only once
//   storage confirms them or the caller discards them.

use crate::modules::time_tracking::adapters::outbound::timesheet_store::{
    TimesheetStore, TimesheetStoreError,
};
use crate::modules::time_tracking::core::duration::format_time;
use crate::modules::time_tracking::core::events::{TimerStarted, TimerStopped, TimesheetSaved};
use crate::modules::time_tracking::core::session::{
    TimedSubject, TimerSession, TimerStatus, Transition,
};
use crate::modules::time_tracking::core::timesheet_entry::TimesheetEntry;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::command::SubmitTimesheetEntry;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::decide::seconds_to_hours;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::decision::{
    DecideError, Decision,
};
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::handler::SubmitTimesheetEntryHandler;
use crate::modules::time_tracking::use_cases::track_time::observer::TimerObserver;
use crate::shared::core::clock::{Clock, EntryDateConvention};
use crate::shared::infrastructure::tick_scheduler::{DEFAULT_TICK_INTERVAL, TickScheduler};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("timesheet submission failed with {pending} entries pending: {source}")]
    SubmissionFailed {
        pending: usize,
        #[source]
        source: TimesheetStoreError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StopOutcome {
    /// The timer was already idle.
    Ignored,
    Skipped {
        elapsed_seconds: u64,
        reason: DecideError,
    },
    Saved(TimesheetSaved),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub id: Uuid,
    pub entry: TimesheetEntry,
    pub elapsed_seconds: u64,
}

impl PendingSubmission {
    fn saved(&self) -> TimesheetSaved {
        TimesheetSaved {
            project_id: self.entry.project_id.clone(),
            task_id: self.entry.task_id.clone(),
            hours: self.entry.hours,
            elapsed_seconds: self.elapsed_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub user_id: String,
    pub project_id: String,
    pub task_id: Option<String>,
    pub status: TimerStatus,
    pub elapsed_seconds: u64,
    pub formatted: String,
    pub pending_submissions: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct TrackerSettings {
    pub tick_interval: Duration,
    pub date_convention: EntryDateConvention,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            date_convention: EntryDateConvention::default(),
        }
    }
}

struct TrackerState {
    session: TimerSession,
    pending: VecDeque<PendingSubmission>,
    /// Queued entries whose `stop` call has not reported back yet. Discarding
    /// skips them.
    awaiting_stop: HashSet<Uuid>,
}

impl TrackerState {
    fn is_pending(&self, id: Uuid) -> bool {
        self.pending.iter().any(|queued| queued.id == id)
    }
}

pub struct TimeTracker<TClock, TStore>
where
    TClock: Clock + ?Sized + 'static,
    TStore: TimesheetStore + ?Sized + 'static,
{
    user_id: String,
    state: Arc<Mutex<TrackerState>>,
    scheduler: TickScheduler,
    clock: Arc<TClock>,
    submissions: SubmitTimesheetEntryHandler<TStore>,
    observer: Arc<dyn TimerObserver>,
    settings: TrackerSettings,
    flush_lock: tokio::sync::Mutex<()>,
}

/// Releases a stop's claim on its queued entry, also when the stop future is
/// dropped mid-submission.
struct StopClaim<'a> {
    state: &'a Mutex<TrackerState>,
    id: Uuid,
}

impl Drop for StopClaim<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .awaiting_stop
            .remove(&self.id);
    }
}

impl<TClock, TStore> TimeTracker<TClock, TStore>
where
    TClock: Clock + ?Sized + 'static,
    TStore: TimesheetStore + ?Sized + 'static,
{
    pub fn new(
        user_id: impl Into<String>,
        subject: TimedSubject,
        clock: Arc<TClock>,
        store: Arc<TStore>,
        observer: Arc<dyn TimerObserver>,
        settings: TrackerSettings,
    ) -> Self {
        let state = TrackerState {
            session: TimerSession::new(subject),
            pending: VecDeque::new(),
            awaiting_stop: HashSet::new(),
        };
        Self {
            user_id: user_id.into(),
            state: Arc::new(Mutex::new(state)),
            scheduler: TickScheduler::new(),
            clock,
            submissions: SubmitTimesheetEntryHandler::new(store, settings.date_convention),
            observer,
            settings,
            flush_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn subject(&self) -> TimedSubject {
        self.lock_state().session.subject().clone()
    }

    pub fn status(&self) -> TimerStatus {
        self.lock_state().session.status()
    }

    /// Session status and queue length, read together.
    pub fn occupancy(&self) -> (TimerStatus, usize) {
        let state = self.lock_state();
        (state.session.status(), state.pending.len())
    }

    pub fn elapsed(&self) -> u64 {
        self.lock_state().session.elapsed(self.clock.now_millis())
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let (subject, status, elapsed_seconds, pending_submissions) = {
            let state = self.lock_state();
            (
                state.session.subject().clone(),
                state.session.status(),
                state.session.elapsed(self.clock.now_millis()),
                state.pending.len(),
            )
        };
        TimerSnapshot {
            user_id: self.user_id.clone(),
            project_id: subject.project_id,
            task_id: subject.task_id,
            status,
            elapsed_seconds,
            formatted: format_time(elapsed_seconds),
            pending_submissions,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Transition {
        let (transition, subject) = {
            let mut state = self.lock_state();
            let transition = state.session.start(self.clock.now_millis());
            if transition != Transition::Ignored {
                self.activate_ticks();
            }
            (transition, state.session.subject().clone())
        };
        self.announce(&transition, subject);
        transition
    }

    pub fn pause(&self) -> Transition {
        let mut state = self.lock_state();
        let transition = state.session.pause(self.clock.now_millis());
        if let Transition::Paused {
            accumulated_seconds,
        } = transition
        {
            self.scheduler.deactivate();
            info!(user_id = %self.user_id, accumulated_seconds, "timer paused");
        }
        transition
    }

    /// Must be called from within a tokio runtime.
    pub fn resume(&self) -> Transition {
        let (transition, subject) = {
            let mut state = self.lock_state();
            let transition = state.session.resume(self.clock.now_millis());
            if transition != Transition::Ignored {
                self.activate_ticks();
            }
            (transition, state.session.subject().clone())
        };
        self.announce(&transition, subject);
        transition
    }

    pub async fn stop(&self) -> Result<StopOutcome, TrackerError> {
        self.stop_with_description(None).await
    }

    pub async fn stop_with_description(
        &self,
        description: Option<String>,
    ) -> Result<StopOutcome, TrackerError> {
        let stopped_at_ms = self.clock.now_millis();
        let (elapsed_seconds, subject, decision) = {
            let mut state = self.lock_state();
            let transition = state.session.stop(stopped_at_ms);
            self.scheduler.deactivate();
            let Transition::Stopped { elapsed_seconds } = transition else {
                return Ok(StopOutcome::Ignored);
            };

            let subject = state.session.subject().clone();
            let decision = self.submissions.decide(SubmitTimesheetEntry {
                user_id: self.user_id.clone(),
                subject: subject.clone(),
                elapsed_seconds,
                description,
                stopped_at_ms,
            });
            let queued = match decision {
                Decision::Accepted { entry } => {
                    let queued = PendingSubmission {
                        id: Uuid::now_v7(),
                        entry,
                        elapsed_seconds,
                    };
                    state.awaiting_stop.insert(queued.id);
                    state.pending.push_back(queued.clone());
                    Ok(queued)
                }
                Decision::Rejected { reason } => Err(reason),
            };
            (elapsed_seconds, subject, queued)
        };

        self.observer.on_stop(&TimerStopped {
            project_id: subject.project_id,
            task_id: subject.task_id,
            elapsed_seconds,
            hours: seconds_to_hours(elapsed_seconds),
        });

        let queued = match decision {
            Ok(queued) => queued,
            Err(reason) => {
                info!(
                    user_id = %self.user_id,
                    elapsed_seconds,
                    %reason,
                    "timer stopped without submission"
                );
                return Ok(StopOutcome::Skipped {
                    elapsed_seconds,
                    reason,
                });
            }
        };

        let _claim = StopClaim {
            state: self.state.as_ref(),
            id: queued.id,
        };
        let _flushing = self.flush_lock.lock().await;
        // A concurrent flush may already have stored this entry.
        if !self.lock_state().is_pending(queued.id) {
            return Ok(StopOutcome::Saved(queued.saved()));
        }
        // Only this stop's entry is sent; older failures wait for a flush.
        if let Err(source) = self.submissions.submit(&queued.entry).await {
            return Err(TrackerError::SubmissionFailed {
                pending: self.lock_state().pending.len(),
                source,
            });
        }
        self.lock_state().pending.retain(|pending| pending.id != queued.id);

        let saved = queued.saved();
        self.observer.on_save(&saved);
        Ok(StopOutcome::Saved(saved))
    }

    /// Submits queued entries oldest first, stopping at the first failure.
    pub async fn flush_pending(&self) -> Result<Vec<TimesheetSaved>, TrackerError> {
        let _flushing = self.flush_lock.lock().await;
        let mut saved = Vec::new();
        loop {
            let Some(next) = self.lock_state().pending.front().cloned() else {
                break;
            };
            if let Err(source) = self.submissions.submit(&next.entry).await {
                return Err(TrackerError::SubmissionFailed {
                    pending: self.lock_state().pending.len(),
                    source,
                });
            }
            self.lock_state().pending.retain(|queued| queued.id != next.id);

            let event = next.saved();
            self.observer.on_save(&event);
            saved.push(event);
        }
        Ok(saved)
    }

    pub fn pending(&self) -> Vec<PendingSubmission> {
        self.lock_state().pending.iter().cloned().collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.lock_state().pending.is_empty()
    }

    /// Drops queued entries, returning them to the caller. Waits for any
    /// flush in progress; entries a `stop` call is still submitting are kept.
    pub async fn discard_pending(&self) -> Vec<PendingSubmission> {
        let _flushing = self.flush_lock.lock().await;
        let mut state = self.lock_state();
        let TrackerState {
            pending,
            awaiting_stop,
            ..
        } = &mut *state;
        let mut discarded = Vec::new();
        pending.retain(|queued| {
            let keep = awaiting_stop.contains(&queued.id);
            if !keep {
                discarded.push(queued.clone());
            }
            keep
        });
        if !discarded.is_empty() {
            let count = discarded.len();
            warn!(user_id = %self.user_id, count, "pending timesheet entries discarded");
        }
        discarded
    }

    fn activate_ticks(&self) {
        let state = self.state.clone();
        let clock = self.clock.clone();
        let observer = self.observer.clone();
        self.scheduler.activate(self.settings.tick_interval, move || {
            let elapsed_seconds = state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .session
                .elapsed(clock.now_millis());
            observer.on_tick(elapsed_seconds);
        });
    }

    fn announce(&self, transition: &Transition, subject: TimedSubject) {
        match *transition {
            Transition::Started { start_time_ms } => {
                info!(user_id = %self.user_id, project_id = %subject.project_id, "timer started");
                self.observer.on_start(&TimerStarted {
                    project_id: subject.project_id,
                    task_id: subject.task_id,
                    start_time_ms,
                });
            }
            Transition::Resumed { start_time_ms } => {
                info!(user_id = %self.user_id, start_time_ms, "timer resumed");
            }
            Transition::Ignored => {
                debug!(user_id = %self.user_id, "timer transition ignored");
            }
            Transition::Paused { .. } | Transition::Stopped { .. } => {}
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

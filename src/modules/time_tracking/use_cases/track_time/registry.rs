// One time tracker per user.
//
// A user's tracker measures a single subject. Starting a different subject is
// only allowed once the current session is idle and nothing is pending. A
// tracker that stop, flush or discard leaves idle with an empty queue is
// dropped, so the map only holds users with a live session or unsent entries.

use crate::modules::time_tracking::adapters::outbound::timesheet_store::TimesheetStore;
use crate::modules::time_tracking::core::session::{TimedSubject, TimerStatus, Transition};
use crate::modules::time_tracking::use_cases::track_time::handler::{
    StopOutcome, TimeTracker, TimerSnapshot, TrackerError, TrackerSettings,
};
use crate::modules::time_tracking::use_cases::track_time::observer::TimerObserver;
use crate::shared::core::clock::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no timer for user {0}")]
    NotFound(String),

    #[error("user {user_id} is already tracking project {project_id}")]
    SessionActive { user_id: String, project_id: String },

    #[error("user {user_id} has {pending} unsubmitted timesheet entries")]
    PendingSubmissions { user_id: String, pending: usize },

    #[error("project id must not be empty")]
    MissingProject,

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

pub struct TimerRegistry<TClock, TStore>
where
    TClock: Clock + ?Sized + 'static,
    TStore: TimesheetStore + ?Sized + 'static,
{
    clock: Arc<TClock>,
    store: Arc<TStore>,
    observer: Arc<dyn TimerObserver>,
    settings: TrackerSettings,
    trackers: RwLock<HashMap<String, Arc<TimeTracker<TClock, TStore>>>>,
}

impl<TClock, TStore> TimerRegistry<TClock, TStore>
where
    TClock: Clock + ?Sized + 'static,
    TStore: TimesheetStore + ?Sized + 'static,
{
    pub fn new(
        clock: Arc<TClock>,
        store: Arc<TStore>,
        observer: Arc<dyn TimerObserver>,
        settings: TrackerSettings,
    ) -> Self {
        Self {
            clock,
            store,
            observer,
            settings,
            trackers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(
        &self,
        user_id: &str,
    ) -> Result<Arc<TimeTracker<TClock, TStore>>, RegistryError> {
        self.trackers
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(user_id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.trackers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.trackers.read().await.is_empty()
    }

    pub async fn start(
        &self,
        user_id: &str,
        subject: TimedSubject,
    ) -> Result<TimerSnapshot, RegistryError> {
        if subject.project_id.trim().is_empty() {
            return Err(RegistryError::MissingProject);
        }

        let mut trackers = self.trackers.write().await;
        if let Some(existing) = trackers.get(user_id) {
            if existing.subject() == subject {
                existing.start();
                return Ok(existing.snapshot());
            }
            // A stop queues its entry under the same lock that idles the
            // session, so a single read covers an in-flight submission too.
            match existing.occupancy() {
                (TimerStatus::Idle, 0) => {}
                (TimerStatus::Idle, pending) => {
                    return Err(RegistryError::PendingSubmissions {
                        user_id: user_id.to_string(),
                        pending,
                    });
                }
                _ => {
                    return Err(RegistryError::SessionActive {
                        user_id: user_id.to_string(),
                        project_id: existing.subject().project_id,
                    });
                }
            }
        }

        info!(user_id, project_id = %subject.project_id, "creating timer");
        let tracker = Arc::new(TimeTracker::new(
            user_id,
            subject,
            self.clock.clone(),
            self.store.clone(),
            self.observer.clone(),
            self.settings,
        ));
        tracker.start();
        let snapshot = tracker.snapshot();
        trackers.insert(user_id.to_string(), tracker);
        Ok(snapshot)
    }

    pub async fn pause(&self, user_id: &str) -> Result<(Transition, TimerSnapshot), RegistryError> {
        // Held across the transition so the tracker cannot be dropped meanwhile.
        let trackers = self.trackers.read().await;
        let tracker = trackers
            .get(user_id)
            .ok_or_else(|| RegistryError::NotFound(user_id.to_string()))?;
        let transition = tracker.pause();
        Ok((transition, tracker.snapshot()))
    }

    pub async fn resume(
        &self,
        user_id: &str,
    ) -> Result<(Transition, TimerSnapshot), RegistryError> {
        let trackers = self.trackers.read().await;
        let tracker = trackers
            .get(user_id)
            .ok_or_else(|| RegistryError::NotFound(user_id.to_string()))?;
        let transition = tracker.resume();
        Ok((transition, tracker.snapshot()))
    }

    pub async fn stop(
        &self,
        user_id: &str,
        description: Option<String>,
    ) -> Result<StopOutcome, RegistryError> {
        let tracker = self.get(user_id).await?;
        let outcome = tracker.stop_with_description(description).await;
        self.release_if_settled(user_id, &tracker).await;
        Ok(outcome?)
    }

    pub async fn flush(&self, user_id: &str) -> Result<usize, RegistryError> {
        let tracker = self.get(user_id).await?;
        let flushed = tracker.flush_pending().await;
        self.release_if_settled(user_id, &tracker).await;
        Ok(flushed?.len())
    }

    /// Drops the user's unsubmitted entries; returns how many were dropped.
    pub async fn discard(&self, user_id: &str) -> Result<usize, RegistryError> {
        let tracker = self.get(user_id).await?;
        let discarded = tracker.discard_pending().await.len();
        self.release_if_settled(user_id, &tracker).await;
        Ok(discarded)
    }

    pub async fn snapshot(&self, user_id: &str) -> Result<TimerSnapshot, RegistryError> {
        Ok(self.get(user_id).await?.snapshot())
    }

    async fn release_if_settled(
        &self,
        user_id: &str,
        tracker: &Arc<TimeTracker<TClock, TStore>>,
    ) {
        let mut trackers = self.trackers.write().await;
        let is_current = trackers
            .get(user_id)
            .is_some_and(|current| Arc::ptr_eq(current, tracker));
        if is_current && tracker.occupancy() == (TimerStatus::Idle, 0) {
            trackers.remove(user_id);
            debug!(user_id, "timer released");
        }
    }
}

use async_graphql::{Context, Enum, Object, Result as GqlResult, SimpleObject};

use crate::modules::time_tracking::core::session::{TimedSubject, TimerStatus};
use crate::modules::time_tracking::use_cases::track_time::handler::{StopOutcome, TimerSnapshot};
use crate::modules::time_tracking::use_cases::track_time::registry::RegistryError;
use crate::shell::state::AppState;

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum GqlTimerStatus {
    Idle,
    Running,
    Paused,
}

impl From<TimerStatus> for GqlTimerStatus {
    fn from(status: TimerStatus) -> Self {
        match status {
            TimerStatus::Idle => GqlTimerStatus::Idle,
            TimerStatus::Running => GqlTimerStatus::Running,
            TimerStatus::Paused => GqlTimerStatus::Paused,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTimer {
    pub user_id: String,
    pub project_id: String,
    pub task_id: Option<String>,
    pub status: GqlTimerStatus,
    pub elapsed_seconds: u64,
    pub formatted: String,
    pub pending_submissions: u64,
}

impl From<TimerSnapshot> for GqlTimer {
    fn from(s: TimerSnapshot) -> Self {
        Self {
            user_id: s.user_id,
            project_id: s.project_id,
            task_id: s.task_id,
            status: s.status.into(),
            elapsed_seconds: s.elapsed_seconds,
            formatted: s.formatted,
            pending_submissions: s.pending_submissions as u64,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum GqlStopOutcome {
    Ignored,
    Skipped,
    Saved,
}

#[derive(SimpleObject, Clone)]
pub struct GqlStopResult {
    pub outcome: GqlStopOutcome,
    pub elapsed_seconds: Option<u64>,
    pub hours: Option<f64>,
    pub reason: Option<String>,
}

impl From<StopOutcome> for GqlStopResult {
    fn from(outcome: StopOutcome) -> Self {
        match outcome {
            StopOutcome::Ignored => Self {
                outcome: GqlStopOutcome::Ignored,
                elapsed_seconds: None,
                hours: None,
                reason: None,
            },
            StopOutcome::Skipped {
                elapsed_seconds,
                reason,
            } => Self {
                outcome: GqlStopOutcome::Skipped,
                elapsed_seconds: Some(elapsed_seconds),
                hours: None,
                reason: Some(reason.to_string()),
            },
            StopOutcome::Saved(saved) => Self {
                outcome: GqlStopOutcome::Saved,
                elapsed_seconds: Some(saved.elapsed_seconds),
                hours: Some(saved.hours),
                reason: None,
            },
        }
    }
}

fn gql_error(err: RegistryError) -> async_graphql::Error {
    async_graphql::Error::new(err.to_string())
}

#[derive(Default)]
pub struct TimerQuery;

#[Object]
impl TimerQuery {
    async fn timer(&self, context: &Context<'_>, user_id: String) -> GqlResult<Option<GqlTimer>> {
        let state = context.data_unchecked::<AppState>();
        match state.timers.snapshot(&user_id).await {
            Ok(snapshot) => Ok(Some(snapshot.into())),
            Err(RegistryError::NotFound(_)) => Ok(None),
            Err(err) => Err(gql_error(err)),
        }
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn start_timer(
        &self,
        context: &Context<'_>,
        user_id: String,
        project_id: String,
        task_id: Option<String>,
    ) -> GqlResult<GqlTimer> {
        let state = context.data_unchecked::<AppState>();
        let snapshot = state
            .timers
            .start(&user_id, TimedSubject::new(project_id, task_id))
            .await
            .map_err(gql_error)?;
        Ok(snapshot.into())
    }

    async fn pause_timer(&self, context: &Context<'_>, user_id: String) -> GqlResult<GqlTimer> {
        let state = context.data_unchecked::<AppState>();
        let (_, snapshot) = state.timers.pause(&user_id).await.map_err(gql_error)?;
        Ok(snapshot.into())
    }

    async fn resume_timer(&self, context: &Context<'_>, user_id: String) -> GqlResult<GqlTimer> {
        let state = context.data_unchecked::<AppState>();
        let (_, snapshot) = state.timers.resume(&user_id).await.map_err(gql_error)?;
        Ok(snapshot.into())
    }

    async fn stop_timer(
        &self,
        context: &Context<'_>,
        user_id: String,
        description: Option<String>,
    ) -> GqlResult<GqlStopResult> {
        let state = context.data_unchecked::<AppState>();
        let outcome = state
            .timers
            .stop(&user_id, description)
            .await
            .map_err(gql_error)?;
        Ok(outcome.into())
    }

    /// Retries entries whose submission failed; returns how many were stored.
    async fn flush_pending_submissions(
        &self,
        context: &Context<'_>,
        user_id: String,
    ) -> GqlResult<u64> {
        let state = context.data_unchecked::<AppState>();
        let submitted = state.timers.flush(&user_id).await.map_err(gql_error)?;
        Ok(submitted as u64)
    }

    /// Drops entries whose submission failed; returns how many were dropped.
    async fn discard_pending_submissions(
        &self,
        context: &Context<'_>,
        user_id: String,
    ) -> GqlResult<u64> {
        let state = context.data_unchecked::<AppState>();
        let discarded = state.timers.discard(&user_id).await.map_err(gql_error)?;
        Ok(discarded as u64)
    }
}

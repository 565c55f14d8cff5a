use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::modules::time_tracking::core::session::TimedSubject;
use crate::modules::time_tracking::use_cases::track_time::handler::{StopOutcome, TrackerError};
use crate::modules::time_tracking::use_cases::track_time::registry::RegistryError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StartTimerBody {
    pub project_id: String,
    pub task_id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct StopTimerBody {
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct StopTimerResponse {
    pub outcome: &'static str,
    pub elapsed_seconds: Option<u64>,
    pub hours: Option<f64>,
    pub reason: Option<String>,
}

impl From<StopOutcome> for StopTimerResponse {
    fn from(outcome: StopOutcome) -> Self {
        match outcome {
            StopOutcome::Ignored => Self {
                outcome: "ignored",
                elapsed_seconds: None,
                hours: None,
                reason: None,
            },
            StopOutcome::Skipped {
                elapsed_seconds,
                reason,
            } => Self {
                outcome: "skipped",
                elapsed_seconds: Some(elapsed_seconds),
                hours: None,
                reason: Some(reason.to_string()),
            },
            StopOutcome::Saved(saved) => Self {
                outcome: "saved",
                elapsed_seconds: Some(saved.elapsed_seconds),
                hours: Some(saved.hours),
                reason: None,
            },
        }
    }
}

#[derive(Serialize)]
pub struct FlushResponse {
    pub submitted: usize,
}

#[derive(Serialize)]
pub struct DiscardResponse {
    pub discarded: usize,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending: Option<usize>,
}

fn error_response(err: RegistryError) -> Response {
    let (status, pending) = match &err {
        RegistryError::NotFound(_) => (StatusCode::NOT_FOUND, None),
        RegistryError::SessionActive { .. } => (StatusCode::CONFLICT, None),
        RegistryError::PendingSubmissions { pending, .. } => {
            (StatusCode::CONFLICT, Some(*pending))
        }
        RegistryError::MissingProject => (StatusCode::UNPROCESSABLE_ENTITY, None),
        RegistryError::Tracker(TrackerError::SubmissionFailed { pending, .. }) => {
            warn!(error = %err, "timesheet submission failed");
            (StatusCode::BAD_GATEWAY, Some(*pending))
        }
    };
    let body = ErrorBody {
        error: err.to_string(),
        pending,
    };
    (status, Json(body)).into_response()
}

pub async fn start(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<StartTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state
        .timers
        .start(&user_id, TimedSubject::new(body.project_id, body.task_id))
        .await
    {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn pause(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.timers.pause(&user_id).await {
        Ok((_, snapshot)) => Json(snapshot).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn resume(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.timers.resume(&user_id).await {
        Ok((_, snapshot)) => Json(snapshot).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn stop(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<StopTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(Json(b)) => b,
        Err(JsonRejection::MissingJsonContentType(_)) => StopTimerBody::default(),
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.timers.stop(&user_id, body.description).await {
        Ok(outcome) => Json(StopTimerResponse::from(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn flush(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.timers.flush(&user_id).await {
        Ok(submitted) => Json(FlushResponse { submitted }).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn discard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.timers.discard(&user_id).await {
        Ok(discarded) => Json(DiscardResponse { discarded }).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.timers.snapshot(&user_id).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => error_response(err),
    }
}

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::warn;

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListTimesheetEntriesParams {
    pub user_id: String,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub sort_desc: Option<bool>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListTimesheetEntriesParams>,
) -> impl IntoResponse {
    match state
        .queries
        .list_by_user_id(
            &params.user_id,
            params.offset.unwrap_or(0),
            params.limit.unwrap_or(20),
            params.sort_desc.unwrap_or(true),
        )
        .await
    {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => {
            warn!(error = %err, user_id = %params.user_id, "listing timesheet entries failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

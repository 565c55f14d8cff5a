use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::modules::time_tracking::use_cases::list_timesheet_entries::inbound::http as list_http;
use crate::modules::time_tracking::use_cases::track_time::inbound::http as timer_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/timers/{user_id}", get(timer_http::show))
        .route("/timers/{user_id}/start", post(timer_http::start))
        .route("/timers/{user_id}/pause", post(timer_http::pause))
        .route("/timers/{user_id}/resume", post(timer_http::resume))
        .route("/timers/{user_id}/stop", post(timer_http::stop))
        .route("/timers/{user_id}/flush", post(timer_http::flush))
        .route("/timers/{user_id}/pending", delete(timer_http::discard))
        .route("/timesheets", get(list_http::handle))
        .with_state(state)
}

// Payloads handed to observers at each timer transition.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerStarted {
    pub project_id: String,
    pub task_id: Option<String>,
    pub start_time_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerStopped {
    pub project_id: String,
    pub task_id: Option<String>,
    pub elapsed_seconds: u64,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetSaved {
    pub project_id: String,
    pub task_id: Option<String>,
    pub hours: f64,
    pub elapsed_seconds: u64,
}

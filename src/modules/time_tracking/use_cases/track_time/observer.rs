// Hooks the embedding layer implements to react to timer transitions.
//
// Called synchronously from the tracker, including from the tick task, so
// implementations must not block.

use crate::modules::time_tracking::core::events::{TimerStarted, TimerStopped, TimesheetSaved};

pub trait TimerObserver: Send + Sync {
    fn on_start(&self, _event: &TimerStarted) {}

    /// Live elapsed seconds, once per tick while running.
    fn on_tick(&self, _elapsed_seconds: u64) {}

    fn on_stop(&self, _event: &TimerStopped) {}

    fn on_save(&self, _event: &TimesheetSaved) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TimerObserver for NoopObserver {}

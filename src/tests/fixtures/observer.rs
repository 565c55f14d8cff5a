use crate::modules::time_tracking::core::events::{TimerStarted, TimerStopped, TimesheetSaved};
use crate::modules::time_tracking::use_cases::track_time::observer::TimerObserver;
use std::sync::Mutex;

/// Observer that keeps every hook invocation for later assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    started: Mutex<Vec<TimerStarted>>,
    ticks: Mutex<Vec<u64>>,
    stopped: Mutex<Vec<TimerStopped>>,
    saved: Mutex<Vec<TimesheetSaved>>,
}

impl RecordingObserver {
    pub fn started(&self) -> Vec<TimerStarted> {
        self.started.lock().unwrap().clone()
    }

    pub fn ticks(&self) -> Vec<u64> {
        self.ticks.lock().unwrap().clone()
    }

    pub fn stopped(&self) -> Vec<TimerStopped> {
        self.stopped.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<TimesheetSaved> {
        self.saved.lock().unwrap().clone()
    }
}

impl TimerObserver for RecordingObserver {
    fn on_start(&self, event: &TimerStarted) {
        self.started.lock().unwrap().push(event.clone());
    }

    fn on_tick(&self, elapsed_seconds: u64) {
        self.ticks.lock().unwrap().push(elapsed_seconds);
    }

    fn on_stop(&self, event: &TimerStopped) {
        self.stopped.lock().unwrap().push(event.clone());
    }

    fn on_save(&self, event: &TimesheetSaved) {
        self.saved.lock().unwrap().push(event.clone());
    }
}

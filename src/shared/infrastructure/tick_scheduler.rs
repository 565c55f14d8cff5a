// Periodic callback driver for live display.
//
// At most one interval task exists per scheduler. Ticks only trigger a
// recomputation in the callback, so delayed or skipped ticks never affect the
// measured duration.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Default)]
pub struct TickScheduler {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the interval task on the current tokio runtime. A previously
    /// active interval is aborted first.
    pub fn activate<F>(&self, period: Duration, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        let mut guard = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = guard.take() {
            previous.abort();
        }

        let first_tick = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick();
            }
        });
        *guard = Some(handle);
    }

    pub fn deactivate(&self) {
        if let Some(handle) = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.deactivate();
    }
}

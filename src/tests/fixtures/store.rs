use crate::modules::time_tracking::adapters::outbound::timesheet_store::{
    TimesheetStore, TimesheetStoreError,
};
use crate::modules::time_tracking::adapters::outbound::timesheet_store_in_memory::InMemoryTimesheetStore;
use crate::modules::time_tracking::core::timesheet_entry::TimesheetEntry;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, Semaphore};

/// In memory store whose create calls wait for `release` before storing, so
/// tests can act while a submission is in flight.
pub struct GatedTimesheetStore {
    inner: InMemoryTimesheetStore,
    gate: Semaphore,
    entered: Notify,
}

impl GatedTimesheetStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryTimesheetStore::new(),
            gate: Semaphore::new(0),
            entered: Notify::new(),
        }
    }

    pub fn inner(&self) -> &InMemoryTimesheetStore {
        &self.inner
    }

    /// Resolves once a create call is waiting at the gate.
    pub async fn wait_for_create(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self, creates: usize) {
        self.gate.add_permits(creates);
    }
}

impl Default for GatedTimesheetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimesheetStore for GatedTimesheetStore {
    async fn create_timesheet_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<(), TimesheetStoreError> {
        self.entered.notify_one();
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|err| TimesheetStoreError::Backend(err.to_string()))?;
        permit.forget();
        self.inner.create_timesheet_entry(entry).await
    }
}

/// In memory store that refuses entries of one exact hour value, the way a
/// validating backend refuses a malformed entry.
pub struct RejectingTimesheetStore {
    inner: InMemoryTimesheetStore,
    rejected_hours: f64,
    rejected_calls: AtomicUsize,
}

impl RejectingTimesheetStore {
    pub fn rejecting_hours(hours: f64) -> Self {
        Self {
            inner: InMemoryTimesheetStore::new(),
            rejected_hours: hours,
            rejected_calls: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &InMemoryTimesheetStore {
        &self.inner
    }

    pub fn rejected_calls(&self) -> usize {
        self.rejected_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TimesheetStore for RejectingTimesheetStore {
    async fn create_timesheet_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<(), TimesheetStoreError> {
        if entry.hours == self.rejected_hours {
            self.rejected_calls.fetch_add(1, Ordering::SeqCst);
            return Err(TimesheetStoreError::Rejected("invalid hours".into()));
        }
        self.inner.create_timesheet_entry(entry).await
    }
}

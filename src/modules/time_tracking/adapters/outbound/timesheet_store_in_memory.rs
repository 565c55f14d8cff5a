// In memory timesheet storage for tests and local development.

use crate::modules::time_tracking::adapters::outbound::timesheet_store::{
    TimesheetStore, TimesheetStoreError,
};
use crate::modules::time_tracking::core::timesheet_entry::TimesheetEntry;
use crate::modules::time_tracking::use_cases::list_timesheet_entries::queries_port::{
    TimesheetEntryView, TimesheetQueries,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryTimesheetStore {
    rows: RwLock<Vec<TimesheetEntryView>>,
    is_offline: AtomicBool,
    create_calls: AtomicUsize,
}

impl InMemoryTimesheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Number of create attempts, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl TimesheetStore for InMemoryTimesheetStore {
    async fn create_timesheet_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<(), TimesheetStoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(TimesheetStoreError::Backend("Timesheet store offline".into()));
        }
        if entry.hours <= 0.0 {
            return Err(TimesheetStoreError::Rejected(
                "hours must be greater than zero".into(),
            ));
        }

        let row = TimesheetEntryView {
            id: Uuid::now_v7().to_string(),
            user_id: entry.user_id.clone(),
            project_id: entry.project_id.clone(),
            task_id: entry.task_id.clone(),
            date: entry.date,
            hours: entry.hours,
            description: entry.description.clone(),
        };
        self.rows.write().await.push(row);
        Ok(())
    }
}

#[async_trait::async_trait]
impl TimesheetQueries for InMemoryTimesheetStore {
    async fn list_by_user_id(
        &self,
        user_id: &str,
        offset: u64,
        limit: u64,
        sort_by_date_desc: bool,
    ) -> anyhow::Result<Vec<TimesheetEntryView>> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Timesheet store offline"));
        }

        let guard = self.rows.read().await;
        let mut items: Vec<TimesheetEntryView> = guard
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();

        // Stable sort: same-day rows keep insertion order.
        items.sort_by_key(|row| row.date);
        if sort_by_date_desc {
            items.reverse();
        }

        Ok(items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

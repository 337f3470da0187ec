use super::actor::{ScheduleActor, ScheduleActorHandle, ScheduleSnapshot};
use super::classifier::classify;
use super::models::{DayInfo, Override, ShiftPattern};
use super::month::MonthView;
use crate::components::storage::{KeyValueStore, ScheduleRepository};
use crate::error::AppResult;
use chrono::{NaiveDate, Weekday};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Handle for interacting with the schedule actor
#[derive(Clone)]
pub struct ScheduleHandle {
    actor_handle: ScheduleActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl ScheduleHandle {
    /// Load the stored schedule and spawn the actor that owns it
    pub async fn spawn(store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let repository = ScheduleRepository::new(store);
        let state = ScheduleSnapshot {
            pattern: repository.load_pattern().await?,
            overrides: repository.load_overrides().await?,
        };
        info!(
            "Loaded schedule: pattern {}, {} overrides",
            if state.pattern.is_some() { "configured" } else { "not configured" },
            state.overrides.len()
        );

        // Create the actor and get its handle
        let (mut actor, handle) = ScheduleActor::new(repository, state);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Ok(Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        })
    }

    /// Get a consistent copy of the pattern and overrides
    pub async fn snapshot(&self) -> AppResult<ScheduleSnapshot> {
        self.actor_handle.snapshot().await
    }

    /// Replace the pattern wholesale
    pub async fn set_pattern(&self, pattern: ShiftPattern) -> AppResult<()> {
        self.actor_handle.set_pattern(pattern).await
    }

    /// Insert or replace the override for one day
    pub async fn set_override(&self, date: NaiveDate, entry: Override) -> AppResult<()> {
        self.actor_handle.set_override(date, entry).await
    }

    /// Remove the override for one day
    pub async fn clear_override(&self, date: NaiveDate) -> AppResult<bool> {
        self.actor_handle.clear_override(date).await
    }

    /// Mark every day from `start` to `end` as vacation
    pub async fn add_vacation(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        note: impl Into<String>,
    ) -> AppResult<usize> {
        self.actor_handle.add_vacation(start, end, note).await
    }

    /// Forget the pattern and every override
    pub async fn reset(&self) -> AppResult<()> {
        self.actor_handle.reset().await
    }

    /// Classify a single day
    pub async fn day(&self, date: NaiveDate, today: NaiveDate) -> AppResult<DayInfo> {
        let snapshot = self.snapshot().await?;
        let pattern = snapshot.require_pattern()?;
        Ok(classify(date, pattern, &snapshot.overrides, today))
    }

    /// Classify a whole month from one snapshot
    pub async fn month(
        &self,
        year: i32,
        month: u32,
        week_start: Weekday,
        today: NaiveDate,
    ) -> AppResult<MonthView> {
        let snapshot = self.snapshot().await?;
        let pattern = snapshot.require_pattern()?;
        MonthView::build(year, month, week_start, pattern, &snapshot.overrides, today)
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}

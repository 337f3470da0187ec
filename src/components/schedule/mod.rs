mod actor;
pub mod classifier;
mod handle;
pub mod models;
pub mod month;
pub mod range;
pub mod summary;

pub use actor::ScheduleSnapshot;
pub use classifier::classify;
pub use handle::ScheduleHandle;
pub use models::{
    clear_override, set_override, CalendarCell, DayInfo, Override, Overrides, ShiftPattern,
    ShiftType,
};
pub use month::MonthView;
pub use range::{expand_range, vacation_overrides};
pub use summary::summarize;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::storage::{InMemoryStore, KeyValueStore, ScheduleRepository};
    use crate::error::{storage_error, AppResult, Error};
    use async_trait::async_trait;
    use chrono::{NaiveDate, Weekday};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn configured_handle(store: Arc<dyn KeyValueStore>) -> ScheduleHandle {
        let handle = ScheduleHandle::spawn(store).await.unwrap();
        handle
            .set_pattern(ShiftPattern::new(5, 2, ymd(2024, 1, 1)).unwrap())
            .await
            .unwrap();
        handle
    }

    /// Store whose writes can be switched off
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryStore,
        failing: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> AppResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(storage_error("disk unavailable"));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> AppResult<()> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_unconfigured_schedule() {
        let handle = ScheduleHandle::spawn(Arc::new(InMemoryStore::new())).await.unwrap();
        let err = handle.day(ymd(2024, 1, 1), ymd(2024, 1, 1)).await.unwrap_err();
        assert!(matches!(err, Error::NotConfigured));
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_override_flow() {
        let handle = configured_handle(Arc::new(InMemoryStore::new())).await;
        let today = ymd(2024, 1, 15);

        handle
            .set_override(ymd(2024, 1, 3), Override::new(ShiftType::Vacation).with_note("Dentist"))
            .await
            .unwrap();
        let info = handle.day(ymd(2024, 1, 3), today).await.unwrap();
        assert_eq!(info.shift_type, ShiftType::Vacation);
        assert_eq!(info.note, "Dentist");

        assert!(handle.clear_override(ymd(2024, 1, 3)).await.unwrap());
        assert!(!handle.clear_override(ymd(2024, 1, 3)).await.unwrap());
        let info = handle.day(ymd(2024, 1, 3), today).await.unwrap();
        assert_eq!(info.shift_type, ShiftType::Work);
        assert!(!info.is_overridden);
    }

    #[tokio::test]
    async fn test_vacation_is_idempotent() {
        let handle = configured_handle(Arc::new(InMemoryStore::new())).await;

        let written = handle
            .add_vacation(ymd(2024, 2, 1), ymd(2024, 2, 3), "Férias")
            .await
            .unwrap();
        assert_eq!(written, 3);
        let first = handle.snapshot().await.unwrap().overrides;

        handle
            .add_vacation(ymd(2024, 2, 1), ymd(2024, 2, 3), "Férias")
            .await
            .unwrap();
        assert_eq!(handle.snapshot().await.unwrap().overrides, first);
    }

    #[tokio::test]
    async fn test_reversed_vacation_writes_nothing() {
        let handle = configured_handle(Arc::new(InMemoryStore::new())).await;

        let err = handle
            .add_vacation(ymd(2024, 2, 3), ymd(2024, 2, 1), "Férias")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
        assert!(handle.snapshot().await.unwrap().overrides.is_empty());
    }

    #[tokio::test]
    async fn test_state_is_reloaded_from_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let handle = configured_handle(store.clone()).await;
        handle
            .set_override(ymd(2024, 1, 6), Override::new(ShiftType::Swap))
            .await
            .unwrap();
        handle.shutdown().await.unwrap();

        let reopened = ScheduleHandle::spawn(store.clone()).await.unwrap();
        let snapshot = reopened.snapshot().await.unwrap();
        assert_eq!(snapshot.pattern.map(|p| p.work_days), Some(5));
        assert_eq!(snapshot.overrides.len(), 1);

        let repo = ScheduleRepository::new(store);
        assert_eq!(repo.load_overrides().await.unwrap(), snapshot.overrides);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_state() {
        let store = Arc::new(FlakyStore::default());
        let handle = configured_handle(store.clone()).await;
        handle
            .set_override(ymd(2024, 1, 2), Override::new(ShiftType::Other))
            .await
            .unwrap();

        store.failing.store(true, Ordering::SeqCst);
        let err = handle
            .add_vacation(ymd(2024, 1, 1), ymd(2024, 1, 10), "Férias")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.overrides.len(), 1);
        assert_eq!(snapshot.overrides[&ymd(2024, 1, 2)].shift_type, ShiftType::Other);
    }

    #[tokio::test]
    async fn test_reset() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let handle = configured_handle(store.clone()).await;
        handle
            .set_override(ymd(2024, 1, 2), Override::new(ShiftType::Other))
            .await
            .unwrap();

        handle.reset().await.unwrap();
        assert_eq!(handle.snapshot().await.unwrap(), ScheduleSnapshot::default());

        let repo = ScheduleRepository::new(store);
        assert_eq!(repo.load_pattern().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_month_uses_one_snapshot() {
        let handle = configured_handle(Arc::new(InMemoryStore::new())).await;
        handle
            .add_vacation(ymd(2024, 1, 29), ymd(2024, 2, 2), "Férias")
            .await
            .unwrap();

        let view = handle.month(2024, 1, Weekday::Mon, ymd(2024, 1, 15)).await.unwrap();
        assert_eq!(view.summary[&ShiftType::Vacation], 3);
        assert_eq!(view.days().count(), 31);
    }
}

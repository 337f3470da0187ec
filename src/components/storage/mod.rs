mod file;
mod memory;
mod redis_store;

pub use self::file::FileStore;
pub use self::memory::InMemoryStore;
pub use self::redis_store::RedisStore;

use crate::components::schedule::models::{Overrides, ShiftPattern};
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

// Storage key constants
pub mod keys {
    pub const SHIFT_PATTERN: &str = "escalaflex:pattern";
    pub const SHIFT_OVERRIDES: &str = "escalaflex:overrides";
}

/// Persistent key-value storage for serialized schedule state
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read a value, `None` when the key was never written
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a key; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Reads and writes the pattern and overrides through a key-value store
#[derive(Clone)]
pub struct ScheduleRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ScheduleRepository {
    /// Create a repository on top of a store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the stored pattern; `None` means the schedule was never set up
    pub async fn load_pattern(&self) -> AppResult<Option<ShiftPattern>> {
        match self.store.get(keys::SHIFT_PATTERN).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Store a pattern
    pub async fn save_pattern(&self, pattern: &ShiftPattern) -> AppResult<()> {
        let json = serde_json::to_string(pattern)?;
        self.store.set(keys::SHIFT_PATTERN, &json).await?;
        debug!("Saved shift pattern {}", json);
        Ok(())
    }

    /// Load all overrides; a missing key means no overrides
    pub async fn load_overrides(&self) -> AppResult<Overrides> {
        match self.store.get(keys::SHIFT_OVERRIDES).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Overrides::new()),
        }
    }

    /// Store the full override map
    pub async fn save_overrides(&self, overrides: &Overrides) -> AppResult<()> {
        let json = serde_json::to_string(overrides)?;
        self.store.set(keys::SHIFT_OVERRIDES, &json).await?;
        debug!("Saved {} overrides", overrides.len());
        Ok(())
    }

    /// Forget the pattern and every override
    pub async fn clear(&self) -> AppResult<()> {
        self.store.remove(keys::SHIFT_PATTERN).await?;
        self.store.remove(keys::SHIFT_OVERRIDES).await?;
        info!("Cleared stored schedule");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::schedule::models::{Override, ShiftType};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_missing_keys_mean_unconfigured() {
        let repo = ScheduleRepository::new(Arc::new(InMemoryStore::new()));
        assert_eq!(repo.load_pattern().await.unwrap(), None);
        assert!(repo.load_overrides().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = Arc::new(InMemoryStore::new());
        let repo = ScheduleRepository::new(store.clone());

        let pattern = ShiftPattern::new(4, 3, ymd(2024, 3, 10)).unwrap();
        let mut overrides = Overrides::new();
        overrides.insert(ymd(2024, 3, 12), Override::new(ShiftType::Swap).with_note("Troca com João"));
        overrides.insert(ymd(2024, 3, 20), Override::new(ShiftType::Other));

        repo.save_pattern(&pattern).await.unwrap();
        repo.save_overrides(&overrides).await.unwrap();

        assert_eq!(repo.load_pattern().await.unwrap(), Some(pattern));
        assert_eq!(repo.load_overrides().await.unwrap(), overrides);

        // Stored in the documented layout
        let raw = store.get(keys::SHIFT_PATTERN).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["startDate"], "2024-03-10");
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = ScheduleRepository::new(Arc::new(InMemoryStore::new()));
        repo.save_pattern(&ShiftPattern::new(1, 1, ymd(2024, 1, 1)).unwrap())
            .await
            .unwrap();
        repo.clear().await.unwrap();
        assert_eq!(repo.load_pattern().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_data_is_an_error() {
        let store = Arc::new(InMemoryStore::new());
        store.set(keys::SHIFT_OVERRIDES, "{not json").await.unwrap();
        let repo = ScheduleRepository::new(store);
        assert!(repo.load_overrides().await.is_err());
    }
}

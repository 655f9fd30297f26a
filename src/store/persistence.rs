use std::sync::Arc;

use crate::kv::KeyValueStore;
use crate::model::Booking;

use super::PersistenceError;

/// The whole booking collection stored as one JSON array under one key.
#[derive(Clone)]
pub struct BookingPersistence {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl BookingPersistence {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored bookings, or empty if nothing was ever saved. Unreadable or
    /// malformed data is an error; callers decide whether to degrade.
    pub async fn load(&self) -> Result<Vec<Booking>, PersistenceError> {
        match self.kv.get(&self.key).await? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() || raw.trim() == "null" => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }

    pub async fn save(&self, bookings: &[Booking]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(bookings)?;
        self.kv.set(&self.key, &raw).await
    }
}

mod error;
mod persistence;
#[cfg(test)]
mod tests;

pub use error::{Outcome, PersistenceError};
pub use persistence::BookingPersistence;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::kv::{FileStore, KeyValueStore};
use crate::model::*;
use crate::observability::{self, PersistOp};
use crate::pricing::{self, ValidationError};

/// A booking joined to the room it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBooking<'a> {
    pub booking: Booking,
    pub room: &'a Room,
}

/// Owns the saved-stay collection and mirrors it to a key-value store.
///
/// Mutations hold the collection lock across the save, so concurrent
/// `create`/`cancel` calls serialize and every save writes a collection that
/// includes all earlier mutations.
pub struct BookingStore {
    bookings: Mutex<Vec<Booking>>,
    persistence: BookingPersistence,
}

impl BookingStore {
    /// Load the collection once. Missing, unreadable or corrupt data all
    /// start the store empty.
    pub async fn open(persistence: BookingPersistence) -> Self {
        let bookings = match persistence.load().await {
            Ok(bookings) => {
                debug!("loaded {} saved stays from {}", bookings.len(), persistence.key());
                bookings
            }
            Err(e) => {
                warn!("could not load saved stays from {}, starting empty: {e}", persistence.key());
                observability::record_persistence_failure(PersistOp::Load);
                Vec::new()
            }
        };
        metrics::gauge!(observability::BOOKINGS_ACTIVE).set(bookings.len() as f64);
        Self {
            bookings: Mutex::new(bookings),
            persistence,
        }
    }

    pub async fn with_store(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self::open(BookingPersistence::new(kv, key)).await
    }

    /// File-backed store at `config.data_dir`. Fails only if the directory
    /// can't be created.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, PersistenceError> {
        let kv = Arc::new(FileStore::from_config(config)?);
        Ok(Self::with_store(kv, config.storage_key.clone()).await)
    }

    /// Validate, price and append a booking, then persist the collection.
    /// The booking is kept even when the save fails; see `Outcome::warning`.
    pub async fn create(
        &self,
        room: &Room,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        guests: u32,
    ) -> Result<Outcome<Booking>, ValidationError> {
        if let Err(e) = pricing::validate_booking(room, Some(start), Some(end), guests) {
            metrics::counter!(observability::VALIDATION_REJECTIONS_TOTAL, "reason" => e.reason())
                .increment(1);
            return Err(e);
        }

        let booking = Booking {
            id: Ulid::new().to_string(),
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            start_date: start,
            end_date: end,
            guests,
            total_price: pricing::total_price(room, start, end),
        };

        let mut guard = self.bookings.lock().await;
        guard.push(booking.clone());
        info!(
            "saved stay {} for room {} ({} guests, total {})",
            booking.id, booking.room_id, booking.guests, booking.total_price
        );
        metrics::counter!(observability::BOOKINGS_CREATED_TOTAL).increment(1);
        let warning = self.persist(&guard).await;
        Ok(Outcome {
            value: booking,
            warning,
        })
    }

    /// Remove the booking with `id`. Unknown ids are not an error; `value`
    /// reports whether anything was removed.
    pub async fn cancel(&self, id: &str) -> Outcome<bool> {
        let mut guard = self.bookings.lock().await;
        let before = guard.len();
        guard.retain(|b| b.id != id);
        let removed = guard.len() != before;
        if removed {
            info!("cancelled saved stay {id}");
            metrics::counter!(observability::BOOKINGS_CANCELLED_TOTAL).increment(1);
        } else {
            debug!("cancel of unknown saved stay {id}");
        }
        let warning = self.persist(&guard).await;
        Outcome {
            value: removed,
            warning,
        }
    }

    /// All bookings in insertion order.
    pub async fn list(&self) -> Vec<Booking> {
        self.bookings.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Booking> {
        self.bookings.lock().await.iter().find(|b| b.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.bookings.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookings.lock().await.is_empty()
    }

    /// Split by start date only: `start >= now` is upcoming, the rest past.
    pub async fn partition_by_time(&self, now: DateTime<Utc>) -> Partition {
        let (upcoming, past): (Vec<Booking>, Vec<Booking>) = self
            .list()
            .await
            .into_iter()
            .partition(|b| b.is_upcoming(now));
        Partition { upcoming, past }
    }

    /// Bookings whose room still exists in `catalog`, in insertion order.
    /// Dangling room ids are skipped, not removed.
    pub async fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<ResolvedBooking<'a>> {
        self.list()
            .await
            .into_iter()
            .filter_map(|booking| {
                let room = catalog.get(&booking.room_id)?;
                Some(ResolvedBooking { booking, room })
            })
            .collect()
    }

    /// Mirror the collection; caller holds the lock.
    async fn persist(&self, bookings: &[Booking]) -> Option<PersistenceError> {
        metrics::gauge!(observability::BOOKINGS_ACTIVE).set(bookings.len() as f64);
        match self.persistence.save(bookings).await {
            Ok(()) => None,
            Err(e) => {
                warn!("failed to persist saved stays to {}: {e}", self.persistence.key());
                observability::record_persistence_failure(PersistOp::Save);
                Some(e)
            }
        }
    }
}

use super::*;
use crate::kv::MemoryStore;

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, TimeZone};

const KEY: &str = "savedStays";

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn room(id: &str, price: u32, capacity: u32) -> Room {
    Room {
        id: id.into(),
        name: format!("Room {id}"),
        room_type: RoomType::Private,
        description: String::new(),
        capacity,
        price,
        amenities: vec!["WiFi".into()],
        floor: 1,
    }
}

/// Memory store whose reads and writes can be switched to fail.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("storage disabled".into()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io("quota exceeded".into()));
        }
        self.inner.set(key, value).await
    }
}

async fn memory_store() -> (Arc<MemoryStore>, BookingStore) {
    let kv = Arc::new(MemoryStore::new());
    let store = BookingStore::with_store(kv.clone(), KEY).await;
    (kv, store)
}

#[tokio::test]
async fn starts_empty_without_stored_data() {
    let (_, store) = memory_store().await;
    assert!(store.is_empty().await);
    assert!(store.list().await.is_empty());
}

#[tokio::test]
async fn create_then_list() {
    let (_, store) = memory_store().await;
    let r = room("1", 100, 2);
    let out = store.create(&r, day(2026, 1, 1), day(2026, 1, 3), 2).await.unwrap();
    assert!(out.is_persisted());
    let booking = out.into_value();

    let all = store.list().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], booking);
    assert!(!booking.id.is_empty());
    assert_eq!(booking.total_price, 200);
    assert_eq!(booking.room_id, "1");
    assert_eq!(booking.room_name, "Room 1");
    assert_eq!(booking.guests, 2);
}

#[tokio::test]
async fn partial_day_is_charged_as_full_day() {
    let (_, store) = memory_store().await;
    let r = room("1", 80, 2);
    let start = day(2026, 1, 1);
    let b = store
        .create(&r, start, start + Duration::hours(36), 1)
        .await
        .unwrap()
        .into_value();
    assert_eq!(b.total_price, 160);
}

#[tokio::test]
async fn ids_are_unique() {
    let (_, store) = memory_store().await;
    let r = room("1", 100, 2);
    let mut ids = std::collections::HashSet::new();
    for i in 1..=20 {
        let b = store
            .create(&r, day(2026, 3, i), day(2026, 3, i + 1), 1)
            .await
            .unwrap()
            .into_value();
        assert!(ids.insert(b.id));
    }
    assert_eq!(store.len().await, 20);
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let (_, store) = memory_store().await;
    let r = room("1", 100, 2);
    // Later stay first: order must follow creation, not dates.
    let a = store.create(&r, day(2026, 6, 1), day(2026, 6, 2), 1).await.unwrap().value;
    let b = store.create(&r, day(2026, 1, 1), day(2026, 1, 2), 1).await.unwrap().value;
    let c = store.create(&r, day(2026, 3, 1), day(2026, 3, 2), 1).await.unwrap().value;
    let ids: Vec<String> = store.list().await.into_iter().map(|b| b.id).collect();
    assert_eq!(ids, [a.id, b.id, c.id]);
}

#[tokio::test]
async fn invalid_bookings_are_rejected_and_not_stored() {
    let (kv, store) = memory_store().await;
    let r = room("1", 100, 2);

    let same_day = store.create(&r, day(2026, 1, 1), day(2026, 1, 1), 1).await;
    assert!(matches!(same_day, Err(ValidationError::EmptyRange { .. })));

    let too_many = store.create(&r, day(2026, 1, 1), day(2026, 1, 2), 3).await;
    assert_eq!(
        too_many.unwrap_err(),
        ValidationError::GuestsOutOfRange { guests: 3, capacity: 2 }
    );

    let nobody = store.create(&r, day(2026, 1, 1), day(2026, 1, 2), 0).await;
    assert!(nobody.is_err());

    assert!(store.is_empty().await);
    assert_eq!(kv.get(KEY).await.unwrap(), None);
}

#[tokio::test]
async fn cancel_removes_and_persists() {
    let (kv, store) = memory_store().await;
    let r = room("1", 100, 2);
    let keep = store.create(&r, day(2026, 1, 1), day(2026, 1, 2), 1).await.unwrap().value;
    let drop_me = store.create(&r, day(2026, 2, 1), day(2026, 2, 2), 1).await.unwrap().value;

    let out = store.cancel(&drop_me.id).await;
    assert!(out.value);
    assert!(out.is_persisted());
    assert_eq!(store.list().await, vec![keep.clone()]);
    assert!(store.get(&drop_me.id).await.is_none());

    let reopened = BookingStore::with_store(kv, KEY).await;
    assert_eq!(reopened.list().await, vec![keep]);
}

#[tokio::test]
async fn cancel_unknown_id_is_noop() {
    let (_, store) = memory_store().await;
    let r = room("1", 100, 2);
    store.create(&r, day(2026, 1, 1), day(2026, 1, 2), 1).await.unwrap();
    let before = store.list().await;

    let out = store.cancel("does-not-exist").await;
    assert!(!out.value);
    assert!(out.warning.is_none());
    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn cancel_is_idempotent() {
    let (_, store) = memory_store().await;
    let r = room("1", 100, 2);
    let b = store.create(&r, day(2026, 1, 1), day(2026, 1, 2), 1).await.unwrap().value;
    assert!(store.cancel(&b.id).await.value);
    assert!(!store.cancel(&b.id).await.value);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn partition_uses_start_date_only() {
    let (_, store) = memory_store().await;
    let r = room("1", 100, 4);
    let now = day(2026, 5, 10);
    let finished = store.create(&r, day(2026, 5, 1), day(2026, 5, 3), 1).await.unwrap().value;
    let in_progress = store.create(&r, day(2026, 5, 8), day(2026, 5, 12), 1).await.unwrap().value;
    let starts_now = store.create(&r, now, day(2026, 5, 11), 1).await.unwrap().value;
    let later = store.create(&r, day(2026, 6, 1), day(2026, 6, 5), 1).await.unwrap().value;

    let p = store.partition_by_time(now).await;
    assert_eq!(p.upcoming, vec![starts_now, later]);
    assert_eq!(p.past, vec![finished, in_progress]);
}

#[tokio::test]
async fn partition_of_empty_store() {
    let (_, store) = memory_store().await;
    let p = store.partition_by_time(day(2026, 1, 1)).await;
    assert_eq!(p, Partition::default());
}

#[tokio::test]
async fn reload_restores_bookings() {
    let (kv, store) = memory_store().await;
    let r = room("3", 399, 6);
    let b = store.create(&r, day(2026, 8, 1), day(2026, 8, 8), 5).await.unwrap().value;

    let reopened = BookingStore::with_store(kv, KEY).await;
    let loaded = reopened.list().await;
    assert_eq!(loaded, vec![b.clone()]);
    assert_eq!(loaded[0].start_date.date_naive(), b.start_date.date_naive());
    assert_eq!(loaded[0].end_date.date_naive(), b.end_date.date_naive());
}

#[tokio::test]
async fn corrupt_data_degrades_to_empty() {
    let kv = Arc::new(MemoryStore::new());
    kv.set(KEY, "[{\"id\": 7").await.unwrap();
    let store = BookingStore::with_store(kv.clone(), KEY).await;
    assert!(store.is_empty().await);

    // First save overwrites the corrupt value.
    let r = room("1", 100, 2);
    store.create(&r, day(2026, 1, 1), day(2026, 1, 2), 1).await.unwrap();
    let reopened = BookingStore::with_store(kv, KEY).await;
    assert_eq!(reopened.len().await, 1);
}

#[tokio::test]
async fn unreadable_store_degrades_to_empty() {
    let kv = Arc::new(FlakyStore::default());
    kv.fail_reads.store(true, Ordering::SeqCst);
    let store = BookingStore::with_store(kv, KEY).await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn write_failure_keeps_in_memory_state() {
    let kv = Arc::new(FlakyStore::default());
    let store = BookingStore::with_store(kv.clone(), KEY).await;
    let r = room("1", 100, 2);
    kv.fail_writes.store(true, Ordering::SeqCst);

    let out = store.create(&r, day(2026, 1, 1), day(2026, 1, 2), 1).await.unwrap();
    assert_eq!(out.warning, Some(PersistenceError::Io("quota exceeded".into())));
    // Read-your-writes despite the failed save.
    assert_eq!(store.list().await, vec![out.value.clone()]);

    let cancelled = store.cancel(&out.value.id).await;
    assert!(cancelled.value);
    assert!(!cancelled.is_persisted());
    assert!(store.is_empty().await);

    // Nothing ever reached the backing store.
    kv.fail_writes.store(false, Ordering::SeqCst);
    assert_eq!(kv.get(KEY).await.unwrap(), None);
}

#[tokio::test]
async fn snapshots_survive_catalog_changes() {
    let (_, store) = memory_store().await;
    let mut r = room("1", 100, 2);
    let b = store.create(&r, day(2026, 1, 1), day(2026, 1, 3), 2).await.unwrap().value;

    r.price = 500;
    r.name = "Renamed".into();
    let stored = store.get(&b.id).await.unwrap();
    assert_eq!(stored.total_price, 200);
    assert_eq!(stored.room_name, "Room 1");
}

#[tokio::test]
async fn resolve_skips_dangling_rooms() {
    let (_, store) = memory_store().await;
    let catalog = Catalog::reference();
    let known = catalog.get("2").unwrap();
    let ghost = room("99", 100, 2);

    let a = store.create(known, day(2026, 1, 1), day(2026, 1, 2), 1).await.unwrap().value;
    store.create(&ghost, day(2026, 1, 1), day(2026, 1, 2), 1).await.unwrap();

    let resolved = store.resolve(&catalog).await;
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].booking, a);
    assert_eq!(resolved[0].room.id, "2");
    // The dangling booking is still stored.
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn concurrent_creates_are_not_lost() {
    let kv = Arc::new(MemoryStore::new());
    let store = Arc::new(BookingStore::with_store(kv.clone(), KEY).await);
    let r = Arc::new(room("1", 100, 2));

    let mut handles = Vec::new();
    for i in 1..=16u32 {
        let store = store.clone();
        let r = r.clone();
        handles.push(tokio::spawn(async move {
            store
                .create(&r, day(2026, 4, i), day(2026, 4, i + 1), 1)
                .await
                .unwrap()
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(store.len().await, 16);

    let reopened = BookingStore::with_store(kv, KEY).await;
    assert_eq!(reopened.len().await, 16);
}

//! RocksDB storage backend.
//!
//! Each collection maps to its own column family (`shipments`, `events`)
//! with the entity id as key and the JSON-serialized entity as value. A
//! save replaces the full contents of both column families in a single
//! `WriteBatch`, so the whole-state contract stays atomic.

use crate::store_trait::{Result, ShipmentStore, StoreError, StoreState};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, IteratorMode, Options, WriteBatch, DB};
use std::path::Path;
use std::sync::Arc;

/// Column family holding shipments.
const CF_SHIPMENTS: &str = "shipments";
/// Column family holding tracking events.
const CF_EVENTS: &str = "events";

/// RocksDB implementation of `ShipmentStore`.
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Open (or create) a database at the given path with both column
    /// families present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let db = DB::open_cf(&opts, path, [CF_SHIPMENTS, CF_EVENTS])
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf<'a>(db: &'a DB, name: &str) -> Result<&'a ColumnFamily> {
        db.cf_handle(name)
            .ok_or_else(|| StoreError::Backend(format!("Column family not found: {}", name)))
    }

    fn read_state(db: &DB) -> Result<StoreState> {
        let mut state = StoreState::default();

        let cf = Self::cf(db, CF_SHIPMENTS)?;
        for entry in db.iterator_cf(cf, IteratorMode::Start) {
            let (_, value) = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            state.shipments.push(serde_json::from_slice(&value)?);
        }

        let cf = Self::cf(db, CF_EVENTS)?;
        for entry in db.iterator_cf(cf, IteratorMode::Start) {
            let (_, value) = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            state.events.push(serde_json::from_slice(&value)?);
        }

        Ok(state)
    }

    fn write_state(db: &DB, state: &StoreState) -> Result<()> {
        let shipments_cf = Self::cf(db, CF_SHIPMENTS)?;
        let events_cf = Self::cf(db, CF_EVENTS)?;

        let mut batch = WriteBatch::default();

        // Replace semantics: drop every existing key, then write the new
        // state, all in one atomic batch.
        for entry in db.iterator_cf(shipments_cf, IteratorMode::Start) {
            let (key, _) = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            batch.delete_cf(shipments_cf, key);
        }
        for entry in db.iterator_cf(events_cf, IteratorMode::Start) {
            let (key, _) = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            batch.delete_cf(events_cf, key);
        }

        for shipment in &state.shipments {
            let value = serde_json::to_vec(shipment)?;
            batch.put_cf(shipments_cf, shipment.id.as_str().as_bytes(), value);
        }
        for event in &state.events {
            let value = serde_json::to_vec(event)?;
            batch.put_cf(events_cf, event.id.as_str().as_bytes(), value);
        }

        db.write(batch).map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl ShipmentStore for RocksDbStore {
    async fn load(&self) -> Result<StoreState> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || Self::read_state(&db))
            .await
            .map_err(|e| StoreError::Backend(format!("Blocking task failed: {}", e)))?
    }

    async fn save(&self, state: &StoreState) -> Result<()> {
        let db = self.db.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || Self::write_state(&db, &state))
            .await
            .map_err(|e| StoreError::Backend(format!("Blocking task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shiptrack_commons::{EventId, Shipment, ShipmentId, ShipmentStatus, TrackingEvent};

    fn scratch_dir(name: &str) -> String {
        format!("./data/test_rocksdb_store_{}_{}", name, std::process::id())
    }

    fn sample_shipment(id: &str) -> Shipment {
        Shipment {
            id: ShipmentId::new(id),
            tracking_number: format!("TRK-{}", id),
            sender_name: "Alice".to_string(),
            receiver_name: "Bob".to_string(),
            origin: "Oslo".to_string(),
            destination: "Bergen".to_string(),
            weight: None,
            category: "General".to_string(),
            status: ShipmentStatus::INITIAL,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrips() {
        let dir = scratch_dir("roundtrip");
        {
            let store = RocksDbStore::open(&dir).unwrap();

            let state = StoreState {
                shipments: vec![sample_shipment("1"), sample_shipment("2")],
                events: vec![TrackingEvent {
                    id: EventId::new("3"),
                    shipment_id: ShipmentId::new("1"),
                    status: ShipmentStatus::INITIAL,
                    location: Some("Oslo".to_string()),
                    notes: Some("Shipment created".to_string()),
                    event_time: Utc::now(),
                }],
            };
            store.save(&state).await.unwrap();

            let loaded = store.load().await.unwrap();
            assert_eq!(loaded.shipments.len(), 2);
            assert_eq!(loaded.events.len(), 1);
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_save_drops_removed_entries() {
        let dir = scratch_dir("replace");
        {
            let store = RocksDbStore::open(&dir).unwrap();

            let state = StoreState {
                shipments: vec![sample_shipment("1"), sample_shipment("2")],
                events: vec![],
            };
            store.save(&state).await.unwrap();

            let smaller = StoreState {
                shipments: vec![sample_shipment("2")],
                events: vec![],
            };
            store.save(&smaller).await.unwrap();

            let loaded = store.load().await.unwrap();
            assert_eq!(loaded.shipments.len(), 1);
            assert_eq!(loaded.shipments[0].id.as_str(), "2");
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}

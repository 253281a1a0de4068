//! In-memory storage backend.
//!
//! Holds the state behind an `RwLock`. Nothing survives a restart; this
//! backend exists for development and tests.

use crate::store_trait::{Result, ShipmentStore, StoreError, StoreState};
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory implementation of `ShipmentStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given state.
    pub fn with_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl ShipmentStore for MemoryStore {
    async fn load(&self) -> Result<StoreState> {
        let guard = self
            .state
            .read()
            .map_err(|e| StoreError::Backend(format!("State lock poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    async fn save(&self, state: &StoreState) -> Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|e| StoreError::Backend(format!("State lock poisoned: {}", e)))?;
        *guard = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shiptrack_commons::{Shipment, ShipmentId, ShipmentStatus};

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
    async fn test_empty_store_loads_empty_state() {
        let store = MemoryStore::new();
        let state = store.load().await.unwrap();
        assert!(state.shipments.is_empty());
        assert!(state.events.is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_state() {
        let store = MemoryStore::new();

        let mut state = StoreState::default();
        state.shipments.push(sample_shipment("1"));
        state.shipments.push(sample_shipment("2"));
        store.save(&state).await.unwrap();

        let mut replacement = StoreState::default();
        replacement.shipments.push(sample_shipment("3"));
        store.save(&replacement).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.shipments.len(), 1);
        assert_eq!(loaded.shipments[0].id.as_str(), "3");
    }
}

//! Storage backend abstraction for pluggable persistence.
//!
//! The contract is deliberately small: a backend loads the whole state
//! (both collections) and saves the whole state, each call atomic from
//! the caller's perspective. Backends differ only in durability and
//! latency; none of them assigns identifiers or interprets the data.
//!
//! ## Backends
//!
//! - **MemoryStore**: `RwLock<StoreState>` — dev and test backend
//! - **JsonFileStore**: one JSON document on disk, atomic rename on save
//! - **RocksDbStore**: column family per collection, batched replace
//! - **GistStore**: remote JSON blob behind the GitHub Gist API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shiptrack_commons::{Shipment, TrackingEvent};
use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure in a local backend (file, RocksDB)
    #[error("I/O error: {0}")]
    Io(String),

    /// Persisted data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote backend unreachable or returned a failure
    #[error("Remote store error: {0}")]
    Remote(String),

    /// Backend-internal failure (poisoned lock, missing column family)
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

/// The full persisted state: every shipment and every tracking event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub shipments: Vec<Shipment>,
    #[serde(default)]
    pub events: Vec<TrackingEvent>,
}

/// Trait for pluggable storage backend implementations.
///
/// Implementations must be thread-safe (Send + Sync). Both operations are
/// async because one backend is remote HTTP; local backends dispatch their
/// blocking work to the runtime's blocking pool.
///
/// ## Error Handling
///
/// Implementations should:
/// - Return `Io` for local read/write failures
/// - Return `Remote` for network-level failures
/// - Return `Serialization` when persisted bytes do not parse
#[async_trait]
pub trait ShipmentStore: Send + Sync {
    /// Load the full state. A backend with nothing persisted yet returns
    /// the empty state, not an error.
    async fn load(&self) -> Result<StoreState>;

    /// Persist the full state, replacing whatever was stored before.
    /// Callers never observe a partial write.
    async fn save(&self, state: &StoreState) -> Result<()>;
}

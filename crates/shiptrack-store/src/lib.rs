//! shiptrack-store
//!
//! The persistence boundary: a single `ShipmentStore` trait with
//! interchangeable physical backends (in-memory, JSON file, RocksDB,
//! remote gist blob). Service logic depends only on the trait and must
//! not observe backend identity.

pub mod gist_store;
pub mod json_file_store;
pub mod memory_store;
pub mod rocksdb_store;
pub mod store_trait;

pub use gist_store::GistStore;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use rocksdb_store::RocksDbStore;
pub use store_trait::{Result, ShipmentStore, StoreError, StoreState};

//! Flat-file storage backend: the whole state as one JSON document.
//!
//! Saves go through a temp file in the same directory followed by a
//! rename, so readers never observe a half-written document. A missing
//! file loads as the empty state (first run).

use crate::store_trait::{Result, ShipmentStore, StoreError, StoreState};
use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// JSON-file implementation of `ShipmentStore`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store persisting to the given file path. The parent
    /// directory is created on the first save if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(path: &Path) -> Result<StoreState> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreState::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn write_state(path: &Path, state: &StoreState) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let serialized = serde_json::to_string_pretty(state)?;

        // Write-then-rename keeps the save atomic on the same filesystem.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[async_trait]
impl ShipmentStore for JsonFileStore {
    async fn load(&self) -> Result<StoreState> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_state(&path))
            .await
            .map_err(|e| StoreError::Backend(format!("Blocking task failed: {}", e)))?
    }

    async fn save(&self, state: &StoreState) -> Result<()> {
        let path = self.path.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || Self::write_state(&path, &state))
            .await
            .map_err(|e| StoreError::Backend(format!("Blocking task failed: {}", e)))?
    }
}

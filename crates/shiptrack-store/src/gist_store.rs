//! Remote storage backend: the state as a JSON blob in a GitHub Gist.
//!
//! The gist holds one file containing the same JSON document the file
//! backend writes to disk. Loads GET the gist, saves PATCH the file
//! content. The GitHub API returns the whole updated gist on PATCH, so a
//! successful response means the write landed in full.

use crate::store_trait::{Result, ShipmentStore, StoreError, StoreState};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Gist-backed implementation of `ShipmentStore`.
pub struct GistStore {
    http: reqwest::Client,
    api_base: String,
    gist_id: String,
    file_name: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct GistResponse {
    #[serde(default)]
    files: HashMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    truncated: bool,
}

impl GistStore {
    /// Create a store backed by the given gist and file name.
    pub fn new(gist_id: impl Into<String>, file_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            gist_id: gist_id.into(),
            file_name: file_name.into(),
            token: token.into(),
        }
    }

    /// Override the API base URL (test servers, GitHub Enterprise).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn gist_url(&self) -> String {
        format!("{}/gists/{}", self.api_base, self.gist_id)
    }

    /// Decode the store state out of the fetched gist file.
    ///
    /// A gist without the file yet, or with empty content, is the empty
    /// state (first run against a fresh gist). The Gist API truncates
    /// large file bodies in place; that must surface as an error rather
    /// than a silently shortened document.
    fn state_from_file(file_name: &str, file: Option<&GistFile>) -> Result<StoreState> {
        let file = match file {
            Some(file) => file,
            None => return Ok(StoreState::default()),
        };

        if file.truncated {
            return Err(StoreError::Remote(format!(
                "Gist file '{}' is truncated; state too large for the gist API",
                file_name
            )));
        }

        match file.content.as_deref() {
            None => Ok(StoreState::default()),
            Some(content) if content.trim().is_empty() => Ok(StoreState::default()),
            Some(content) => Ok(serde_json::from_str(content)?),
        }
    }
}

#[async_trait]
impl ShipmentStore for GistStore {
    async fn load(&self) -> Result<StoreState> {
        debug!("Fetching gist {}", self.gist_id);
        let response = self
            .http
            .get(self.gist_url())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "shiptrack")
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Remote(format!(
                "Gist fetch failed with status {}",
                response.status()
            )));
        }

        let gist: GistResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        Self::state_from_file(&self.file_name, gist.files.get(&self.file_name))
    }

    async fn save(&self, state: &StoreState) -> Result<()> {
        debug!(
            "Updating gist {} ({} shipments, {} events)",
            self.gist_id,
            state.shipments.len(),
            state.events.len()
        );
        let content = serde_json::to_string_pretty(state)?;
        let body = json!({
            "files": {
                &self.file_name: { "content": content }
            }
        });

        let response = self
            .http
            .patch(self.gist_url())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "shiptrack")
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Remote(format!(
                "Gist update failed with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_state() {
        let state = GistStore::state_from_file("shipments.json", None).unwrap();
        assert!(state.shipments.is_empty());
    }

    #[test]
    fn test_empty_content_is_empty_state() {
        let file = GistFile {
            content: Some("   ".to_string()),
            truncated: false,
        };
        let state = GistStore::state_from_file("shipments.json", Some(&file)).unwrap();
        assert!(state.shipments.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_truncated_file_is_an_error() {
        let file = GistFile {
            content: Some("{}".to_string()),
            truncated: true,
        };
        let err = GistStore::state_from_file("shipments.json", Some(&file)).unwrap_err();
        assert!(matches!(err, StoreError::Remote(_)));
    }

    #[test]
    fn test_content_parses_into_state() {
        let file = GistFile {
            content: Some(r#"{"shipments": [], "events": []}"#.to_string()),
            truncated: false,
        };
        let state = GistStore::state_from_file("shipments.json", Some(&file)).unwrap();
        assert_eq!(state, StoreState::default());
    }

    #[test]
    fn test_gist_url_uses_api_base() {
        let store = GistStore::new("abc123", "shipments.json", "tok")
            .with_api_base("http://localhost:9999");
        assert_eq!(store.gist_url(), "http://localhost:9999/gists/abc123");
    }
}

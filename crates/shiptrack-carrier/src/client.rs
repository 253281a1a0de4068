//! Carrier lookup client.
//!
//! Fetches `{base_url}/trackings/{tracking_number}` with the provider API
//! key and translates the provider's checkpoint list into our vocabulary.
//! "Not configured" and "nothing found" are soft results, not errors.

use crate::config::CarrierConfig;
use crate::error::CarrierError;
use log::debug;
use serde::{Deserialize, Serialize};

/// One normalized carrier checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarrierCheckpoint {
    /// Status name mapped into our vocabulary where the provider tag is
    /// recognized; the provider's own wording otherwise.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Provider timestamp, passed through verbatim.
    pub checkpoint_time: String,
}

/// Result of a carrier lookup. `events` is newest-last as the provider
/// reports it; `message` explains an empty list.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingResult {
    pub tracking_number: String,
    pub events: Vec<CarrierCheckpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    data: Option<ProviderTracking>,
}

#[derive(Debug, Deserialize)]
struct ProviderTracking {
    #[serde(default)]
    checkpoints: Vec<ProviderCheckpoint>,
}

#[derive(Debug, Deserialize)]
struct ProviderCheckpoint {
    #[serde(default)]
    tag: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    checkpoint_time: String,
}

/// Client for the external carrier-tracking API.
pub struct CarrierClient {
    config: CarrierConfig,
    http: reqwest::Client,
}

impl CarrierClient {
    /// Create a client for the given provider configuration.
    pub fn new(config: CarrierConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Return a reference to the underlying config.
    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    /// Look up carrier checkpoints for a tracking number.
    pub async fn track(&self, tracking_number: &str) -> Result<TrackingResult, CarrierError> {
        if !self.config.is_configured() {
            return Ok(TrackingResult {
                tracking_number: tracking_number.to_string(),
                events: Vec::new(),
                message: Some("Carrier tracking is not configured".to_string()),
            });
        }

        let url = format!(
            "{}/trackings/{}",
            self.config.base_url.trim_end_matches('/'),
            tracking_number
        );
        debug!("Carrier lookup: {}", url);

        let response = self
            .http
            .get(&url)
            .header(
                "Tracking-Api-Key",
                self.config.api_key.as_deref().unwrap_or_default(),
            )
            .send()
            .await
            .map_err(|e| CarrierError::Http(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(TrackingResult {
                tracking_number: tracking_number.to_string(),
                events: Vec::new(),
                message: Some(format!(
                    "No tracking information found for '{}'",
                    tracking_number
                )),
            });
        }

        if !response.status().is_success() {
            return Err(CarrierError::Provider(response.status().to_string()));
        }

        let body: ProviderResponse = response
            .json()
            .await
            .map_err(|e| CarrierError::Malformed(e.to_string()))?;

        let checkpoints = body.data.map(|d| d.checkpoints).unwrap_or_default();
        let events = checkpoints.into_iter().map(normalize_checkpoint).collect();

        Ok(TrackingResult {
            tracking_number: tracking_number.to_string(),
            events,
            message: None,
        })
    }
}

fn normalize_checkpoint(cp: ProviderCheckpoint) -> CarrierCheckpoint {
    CarrierCheckpoint {
        status: normalize_tag(&cp.tag),
        location: cp.location.filter(|l| !l.is_empty()),
        notes: cp.message.filter(|m| !m.is_empty()),
        checkpoint_time: cp.checkpoint_time,
    }
}

/// Map a provider checkpoint tag onto our status vocabulary. Unrecognized
/// tags pass through untouched so no provider information is lost.
fn normalize_tag(tag: &str) -> String {
    match tag.to_ascii_lowercase().as_str() {
        "inforeceived" | "pending" => "Pending".to_string(),
        "pickedup" | "picked_up" => "Picked Up".to_string(),
        "intransit" | "in_transit" | "transit" => "In Transit".to_string(),
        "outfordelivery" | "out_for_delivery" => "Out for Delivery".to_string(),
        "delivered" => "Delivered".to_string(),
        "exception" | "failedattempt" | "failed_attempt" => "Failed".to_string(),
        "expired" | "returned" | "availableforpickup" => "Returned".to_string(),
        _ => tag.to_string(),
    }
}

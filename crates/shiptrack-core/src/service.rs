//! Shipment service: the single place where shipment and event state is
//! read, validated, and mutated.
//!
//! Every operation runs a full load-mutate-save cycle against the store.
//! Write cycles are serialized behind a mutex so concurrent writers can
//! never interleave partial states (a delete racing a status update, for
//! example). Reads take no lock.

use crate::error::{Result, ServiceError};
use crate::stats::{self, ShipmentStats};
use chrono::Utc;
use log::{debug, info};
use serde::Serialize;
use shiptrack_commons::{
    NewShipment, Shipment, ShipmentId, ShipmentStatus, SnowflakeGenerator, TrackingEvent,
};
use shiptrack_store::ShipmentStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A shipment together with its event history, newest event first.
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentDetail {
    #[serde(flatten)]
    pub shipment: Shipment,
    pub events: Vec<TrackingEvent>,
}

/// Orchestrates all shipment operations over the configured store.
pub struct ShipmentService {
    store: Arc<dyn ShipmentStore>,
    ids: Arc<SnowflakeGenerator>,
    write_lock: Mutex<()>,
}

impl ShipmentService {
    /// Create a service over the given store handle.
    pub fn new(store: Arc<dyn ShipmentStore>, ids: Arc<SnowflakeGenerator>) -> Self {
        Self {
            store,
            ids,
            write_lock: Mutex::new(()),
        }
    }

    /// List shipments, newest first.
    ///
    /// `search` is a case-insensitive substring match against tracking
    /// number, sender, receiver, origin, and destination (any field may
    /// match). `status` restricts to an exact status name; the sentinel
    /// `"All"` means unfiltered.
    pub async fn list_shipments(
        &self,
        search: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Shipment>> {
        let state = self.store.load().await?;
        let mut shipments = state.shipments;

        if let Some(status) = status.filter(|s| *s != "All" && !s.is_empty()) {
            shipments.retain(|s| s.status.as_str() == status);
        }

        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            shipments.retain(|s| {
                [
                    &s.tracking_number,
                    &s.sender_name,
                    &s.receiver_name,
                    &s.origin,
                    &s.destination,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            });
        }

        shipments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(shipments)
    }

    /// Fetch one shipment with its events, newest event first.
    pub async fn get_shipment(&self, id: &ShipmentId) -> Result<ShipmentDetail> {
        let state = self.store.load().await?;

        let shipment = state
            .shipments
            .into_iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| ServiceError::not_found(format!("Shipment '{}' not found", id)))?;

        let mut events: Vec<TrackingEvent> = state
            .events
            .into_iter()
            .filter(|e| &e.shipment_id == id)
            .collect();
        // Newest first; snowflake ids break same-millisecond ties in
        // creation order.
        events.sort_by(|a, b| {
            b.event_time
                .cmp(&a.event_time)
                .then_with(|| b.id.as_str().cmp(a.id.as_str()))
        });

        Ok(ShipmentDetail { shipment, events })
    }

    /// Create a shipment and its creation event.
    pub async fn create_shipment(&self, fields: NewShipment) -> Result<Shipment> {
        validate_new_shipment(&fields)?;

        let _guard = self.write_lock.lock().await;
        let mut state = self.store.load().await?;

        if state
            .shipments
            .iter()
            .any(|s| s.tracking_number == fields.tracking_number)
        {
            return Err(ServiceError::conflict(format!(
                "Tracking number '{}' already exists",
                fields.tracking_number
            )));
        }

        let now = Utc::now();
        let id = self
            .ids
            .next_shipment_id()
            .map_err(ServiceError::Internal)?;

        let category = fields
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "General".to_string());

        let shipment = Shipment {
            id: id.clone(),
            tracking_number: fields.tracking_number.trim().to_string(),
            sender_name: fields.sender_name.trim().to_string(),
            receiver_name: fields.receiver_name.trim().to_string(),
            origin: fields.origin.trim().to_string(),
            destination: fields.destination.trim().to_string(),
            weight: fields.weight,
            category,
            status: ShipmentStatus::INITIAL,
            created_at: now,
            updated_at: now,
        };

        let event = TrackingEvent {
            id: self.ids.next_event_id().map_err(ServiceError::Internal)?,
            shipment_id: id,
            status: ShipmentStatus::INITIAL,
            location: Some(shipment.origin.clone()),
            notes: Some("Shipment created".to_string()),
            event_time: now,
        };

        state.shipments.push(shipment.clone());
        state.events.push(event);
        self.store.save(&state).await?;

        info!(
            "Created shipment {} (tracking {})",
            shipment.id, shipment.tracking_number
        );
        Ok(shipment)
    }

    /// Move a shipment to a new status and record the transition event.
    ///
    /// `status` arrives as the wire string and must parse into the status
    /// enum. Location and notes default to empty strings when omitted.
    pub async fn update_status(
        &self,
        id: &ShipmentId,
        status: &str,
        location: Option<String>,
        notes: Option<String>,
    ) -> Result<()> {
        let status: ShipmentStatus = status
            .parse()
            .map_err(ServiceError::Validation)?;

        let _guard = self.write_lock.lock().await;
        let mut state = self.store.load().await?;

        let now = Utc::now();
        let shipment = state
            .shipments
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| ServiceError::not_found(format!("Shipment '{}' not found", id)))?;

        shipment.status = status;
        shipment.updated_at = now;

        state.events.push(TrackingEvent {
            id: self.ids.next_event_id().map_err(ServiceError::Internal)?,
            shipment_id: id.clone(),
            status,
            location: Some(location.unwrap_or_default()),
            notes: Some(notes.unwrap_or_default()),
            event_time: now,
        });

        self.store.save(&state).await?;

        debug!("Shipment {} moved to {}", id, status);
        Ok(())
    }

    /// Delete a shipment and every event referencing it as one logical
    /// operation.
    pub async fn delete_shipment(&self, id: &ShipmentId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.store.load().await?;

        let before = state.shipments.len();
        state.shipments.retain(|s| &s.id != id);
        if state.shipments.len() == before {
            return Err(ServiceError::not_found(format!(
                "Shipment '{}' not found",
                id
            )));
        }

        state.events.retain(|e| &e.shipment_id != id);
        self.store.save(&state).await?;

        info!("Deleted shipment {}", id);
        Ok(())
    }

    /// Compute the aggregate dashboard payload.
    pub async fn compute_stats(&self) -> Result<ShipmentStats> {
        let state = self.store.load().await?;
        Ok(stats::compute(&state.shipments, Utc::now()))
    }
}

/// Required-field and range validation for a new shipment.
fn validate_new_shipment(fields: &NewShipment) -> Result<()> {
    let required = [
        ("tracking_number", &fields.tracking_number),
        ("sender_name", &fields.sender_name),
        ("receiver_name", &fields.receiver_name),
        ("origin", &fields.origin),
        ("destination", &fields.destination),
    ];

    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(ServiceError::validation(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        )));
    }

    if let Some(weight) = fields.weight {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ServiceError::validation("Weight must be a positive number"));
        }
    }

    Ok(())
}

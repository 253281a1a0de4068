//! Core entities: shipments, tracking events, and the status enum.
//!
//! ## Serialization
//! - **Stores**: JSON via serde (every backend persists the same shape)
//! - **API**: JSON via serde
//!
//! Timestamps are `chrono::DateTime<Utc>` and serialize as ISO-8601.

use crate::ids::{EventId, ShipmentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a shipment.
///
/// A flat set with no enforced transition graph: any status may follow
/// any other. The wire and storage representation uses the human-readable
/// names ("Picked Up", "Out for Delivery", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Pending,
    #[serde(rename = "Picked Up")]
    PickedUp,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Failed,
    Returned,
}

impl ShipmentStatus {
    /// Status assigned to every newly created shipment.
    pub const INITIAL: ShipmentStatus = ShipmentStatus::Pending;

    /// All statuses, in display order.
    pub const ALL: [ShipmentStatus; 7] = [
        ShipmentStatus::Pending,
        ShipmentStatus::PickedUp,
        ShipmentStatus::InTransit,
        ShipmentStatus::OutForDelivery,
        ShipmentStatus::Delivered,
        ShipmentStatus::Failed,
        ShipmentStatus::Returned,
    ];

    /// Canonical display name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::PickedUp => "Picked Up",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::OutForDelivery => "Out for Delivery",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Failed => "Failed",
            ShipmentStatus::Returned => "Returned",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown shipment status '{}'", s))
    }
}

/// A tracked parcel record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    /// Caller-supplied carrier reference, unique across all shipments.
    pub tracking_number: String,
    pub sender_name: String,
    pub receiver_name: String,
    pub origin: String,
    pub destination: String,
    /// Weight in kilograms; positive when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub category: String,
    pub status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A timestamped status checkpoint belonging to one shipment.
///
/// Events are append-only: never mutated or reordered after creation,
/// only deleted en masse with their parent shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub id: EventId,
    pub shipment_id: ShipmentId,
    /// The status the shipment moved to when this event was recorded.
    pub status: ShipmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub event_time: DateTime<Utc>,
}

/// Caller-supplied fields for creating a shipment.
///
/// `id`, `status`, and timestamps are assigned by the service, never by
/// the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewShipment {
    #[serde(default)]
    pub tracking_number: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub receiver_name: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

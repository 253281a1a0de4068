//! Request models for the shipment endpoints.

use serde::Deserialize;
use shiptrack_commons::NewShipment;

/// Query parameters for `GET /api/shipments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListShipmentsQuery {
    /// Case-insensitive substring matched against tracking number,
    /// sender, receiver, origin, and destination.
    #[serde(default)]
    pub search: Option<String>,

    /// Exact status name; "All" (the frontend sentinel) means unfiltered.
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `POST /api/shipments`.
///
/// Field-level validation happens in the service, not here, so an
/// incomplete body still produces a 400 with a field list rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateShipmentRequest {
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

impl From<CreateShipmentRequest> for NewShipment {
    fn from(req: CreateShipmentRequest) -> Self {
        NewShipment {
            tracking_number: req.tracking_number,
            sender_name: req.sender_name,
            receiver_name: req.receiver_name,
            origin: req.origin,
            destination: req.destination,
            weight: req.weight,
            category: req.category,
        }
    }
}

/// Body of `PATCH /api/shipments/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status name; must be one of the defined status values.
    pub status: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

//! shiptrack-commons
//!
//! Shared data model for ShipTrack: shipment and tracking-event entities,
//! the status enum, and type-safe identifier newtypes. Everything here is
//! plain serde data with no storage or HTTP dependencies so that every
//! other crate can depend on it.

pub mod ids;
pub mod models;

pub use ids::{EventId, ShipmentId, SnowflakeGenerator};
pub use models::{NewShipment, Shipment, ShipmentStatus, TrackingEvent};

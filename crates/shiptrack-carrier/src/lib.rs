//! shiptrack-carrier
//!
//! Adapter for a third-party carrier-tracking API. Given a tracking
//! number it fetches the provider's checkpoint list and maps it into a
//! normalized event list. Purely a passthrough/translation layer; nothing
//! here touches the persistence model.

pub mod client;
pub mod config;
pub mod error;

pub use client::{CarrierCheckpoint, CarrierClient, TrackingResult};
pub use config::CarrierConfig;
pub use error::CarrierError;

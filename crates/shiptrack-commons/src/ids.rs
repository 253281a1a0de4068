//! Type-safe identifier newtypes and the snowflake generator that mints them.
//!
//! Shipment and event identifiers are opaque strings. Wrapping them in
//! newtypes prevents passing an event id where a shipment id is expected,
//! and keeps the storage backends free to treat ids as plain keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Type-safe wrapper for shipment identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentId(String);

impl ShipmentId {
    /// Create a new ShipmentId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ShipmentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ShipmentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ShipmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Type-safe wrapper for tracking-event identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Create a new EventId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Snowflake ID generator for time-ordered unique identifiers.
///
/// Format (64 bits):
/// - 41 bits: timestamp in milliseconds since custom epoch
/// - 10 bits: worker ID
/// - 12 bits: sequence number
///
/// Time-ordered ids mean a lexicographic/numeric sort over ids roughly
/// follows creation order, which keeps backend key layouts scan-friendly.
pub struct SnowflakeGenerator {
    /// Worker ID (0-1023). A single-node deployment uses 0.
    worker_id: u16,

    /// Custom epoch (milliseconds since Unix epoch).
    epoch: u64,

    state: Mutex<GeneratorState>,
}

struct GeneratorState {
    last_timestamp: u64,
    sequence: u16,
}

impl SnowflakeGenerator {
    /// Custom epoch: 2024-01-01 00:00:00 UTC
    pub const DEFAULT_EPOCH: u64 = 1_704_067_200_000;

    /// Maximum worker ID
    pub const MAX_WORKER_ID: u16 = 1023;

    /// Maximum sequence number per millisecond
    const MAX_SEQUENCE: u16 = 4095;

    /// Create a new generator with the default epoch.
    pub fn new(worker_id: u16) -> Self {
        assert!(
            worker_id <= Self::MAX_WORKER_ID,
            "worker_id must be <= {}",
            Self::MAX_WORKER_ID
        );

        Self {
            worker_id,
            epoch: Self::DEFAULT_EPOCH,
            state: Mutex::new(GeneratorState {
                last_timestamp: 0,
                sequence: 0,
            }),
        }
    }

    /// Generate the next id.
    ///
    /// Fails only if the system clock moves backwards past the last
    /// generated timestamp.
    pub fn next_id(&self) -> Result<i64, String> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| format!("Snowflake state lock poisoned: {}", e))?;

        let mut timestamp = self.current_timestamp()?;

        if timestamp < state.last_timestamp {
            return Err(format!(
                "Clock moved backwards. Refusing to generate id for {} milliseconds",
                state.last_timestamp - timestamp
            ));
        }

        if timestamp == state.last_timestamp {
            // Same millisecond - increment sequence
            state.sequence = (state.sequence + 1) & Self::MAX_SEQUENCE;

            if state.sequence == 0 {
                // Sequence overflow - wait for the next millisecond
                timestamp = self.wait_next_millis(state.last_timestamp)?;
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = timestamp;

        let id = ((timestamp as i64) << 22)
            | ((self.worker_id as i64) << 12)
            | (state.sequence as i64);

        Ok(id)
    }

    /// Generate the next id rendered as an opaque shipment identifier.
    pub fn next_shipment_id(&self) -> Result<ShipmentId, String> {
        Ok(ShipmentId::new(self.next_id()?.to_string()))
    }

    /// Generate the next id rendered as an opaque event identifier.
    pub fn next_event_id(&self) -> Result<EventId, String> {
        Ok(EventId::new(self.next_id()?.to_string()))
    }

    fn current_timestamp(&self) -> Result<u64, String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| format!("System time before Unix epoch: {}", e))?
            .as_millis() as u64;

        now.checked_sub(self.epoch)
            .ok_or_else(|| "System time before custom epoch".to_string())
    }

    fn wait_next_millis(&self, last: u64) -> Result<u64, String> {
        let mut ts = self.current_timestamp()?;
        while ts <= last {
            std::thread::yield_now();
            ts = self.current_timestamp()?;
        }
        Ok(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_id_roundtrip() {
        let id = ShipmentId::new("12345");
        assert_eq!(id.as_str(), "12345");
        assert_eq!(id.to_string(), "12345");
        assert_eq!(ShipmentId::from("12345"), id);
    }

    #[test]
    fn test_event_id_equality() {
        let a = EventId::new("e1");
        let b = EventId::new("e1");
        let c = EventId::new("e2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_snowflake_ids_unique_and_ordered() {
        let gen = SnowflakeGenerator::new(1);
        let mut prev = gen.next_id().unwrap();
        for _ in 0..1000 {
            let next = gen.next_id().unwrap();
            assert!(next > prev, "ids must be strictly increasing");
            prev = next;
        }
    }

    #[test]
    #[should_panic(expected = "worker_id")]
    fn test_snowflake_rejects_large_worker_id() {
        let _ = SnowflakeGenerator::new(1024);
    }
}

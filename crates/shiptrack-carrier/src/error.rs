/// Errors produced by the carrier lookup client.
#[derive(Debug, thiserror::Error)]
pub enum CarrierError {
    /// Network-level failure reaching the provider.
    #[error("Carrier request failed: {0}")]
    Http(String),

    /// Provider answered with an unexpected status code.
    #[error("Carrier returned status {0}")]
    Provider(String),

    /// Provider response body did not match the documented shape.
    #[error("Carrier response malformed: {0}")]
    Malformed(String),
}

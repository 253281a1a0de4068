//! Response envelopes shared across endpoints.
//!
//! Entity responses (shipments, details, stats) serialize the core types
//! directly; only the success and error envelopes live here.

use serde::Serialize;

/// Body returned by mutations that have no entity to return
/// (status update, delete).
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Machine-readable error details.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Stable error code, e.g. "VALIDATION_ERROR"
    pub code: String,
    /// Human-readable description of what went wrong
    pub message: String,
}

/// JSON error body: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

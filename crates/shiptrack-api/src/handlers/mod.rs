//! HTTP handlers, one module per resource.

pub mod health;
pub mod shipments;
pub mod stats;
pub mod tracking;

pub use health::healthcheck_handler;
pub use shipments::{
    create_shipment, delete_shipment, get_shipment, list_shipments, update_status,
};
pub use stats::get_stats;
pub use tracking::track_shipment;

use crate::models::ErrorResponse;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use shiptrack_core::ServiceError;

/// Translate a service error into its HTTP response.
///
/// Validation → 400, Conflict → 409, NotFound → 404, External → 502,
/// everything else → 500. The body always carries the error message.
pub(crate) fn error_response(err: &ServiceError) -> HttpResponse {
    let (status, code) = match err {
        ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ServiceError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ServiceError::External(_) => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR"),
        ServiceError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
        ServiceError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    if status.is_server_error() {
        log::error!("Request failed: {}", err);
    }

    HttpResponse::build(status).json(ErrorResponse::new(code, err.to_string()))
}

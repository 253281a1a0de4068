//! External carrier-tracking proxy handler.

use actix_web::{get, web, HttpResponse, Responder};
use shiptrack_carrier::CarrierClient;
use shiptrack_core::ServiceError;
use std::sync::Arc;

use super::error_response;

/// GET /api/track/{tracking_number} - Live carrier checkpoints for a
/// tracking number.
///
/// Answers 200 with an empty event list and an explanatory message when
/// no provider key is configured or the provider has no data; provider
/// failures surface as 502.
#[get("/track/{tracking_number}")]
pub async fn track_shipment(
    path: web::Path<String>,
    carrier: web::Data<Arc<CarrierClient>>,
) -> impl Responder {
    let tracking_number = path.into_inner();
    match carrier.track(&tracking_number).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(&ServiceError::External(e.to_string())),
    }
}

//! Aggregate statistics handler.

use actix_web::{get, web, HttpResponse, Responder};
use shiptrack_core::ShipmentService;
use std::sync::Arc;

use super::error_response;

/// GET /api/stats - Dashboard aggregates.
///
/// # Example Response
/// ```json
/// {
///   "statusCounts": [{"status": "Pending", "count": 3}],
///   "categoryCounts": [{"category": "General", "count": 3}],
///   "dailyShipments": [{"date": "2026-08-01", "count": 2}],
///   "totals": {"total": 3, "delivered": 0, "inTransit": 0, "pending": 3}
/// }
/// ```
#[get("/stats")]
pub async fn get_stats(service: web::Data<Arc<ShipmentService>>) -> impl Responder {
    match service.compute_stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

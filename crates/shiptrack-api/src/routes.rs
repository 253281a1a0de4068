//! API routes configuration
//!
//! This module configures all HTTP routes for the ShipTrack API.

use crate::handlers;
use actix_web::web;

/// Configure API routes for ShipTrack
///
/// All endpoints live under the /api prefix:
/// - GET    /api/shipments                 - List shipments (query: search, status)
/// - GET    /api/shipments/{id}            - Shipment detail with events
/// - POST   /api/shipments                 - Create shipment
/// - PATCH  /api/shipments/{id}/status     - Update status
/// - DELETE /api/shipments/{id}            - Delete shipment and events
/// - GET    /api/stats                     - Aggregate statistics
/// - GET    /api/track/{tracking_number}   - Live carrier lookup
/// - GET    /api/healthcheck               - Health check endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::list_shipments)
            .service(handlers::create_shipment)
            .service(handlers::update_status)
            .service(handlers::delete_shipment)
            .service(handlers::get_shipment)
            .service(handlers::get_stats)
            .service(handlers::track_shipment)
            .service(handlers::healthcheck_handler),
    );
}

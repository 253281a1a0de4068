//! HTTP route registration for the ShipTrack server.
//!
//! This module wires the Actix-Web application to the shared
//! `shiptrack-api` route configuration so the server keeps its
//! entrypoint lightweight.

use actix_web::web;

/// Register all HTTP routes for the server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    shiptrack_api::routes::configure_routes(cfg);
}

//! Liveness handler.

use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// GET /api/healthcheck - Simple liveness check.
///
/// Returns 200 OK while the server is running. No authentication;
/// designed for load balancer health checks.
#[get("/healthcheck")]
pub async fn healthcheck_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

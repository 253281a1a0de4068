//! Shipment CRUD handlers for the `/api/shipments` endpoints.

use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use shiptrack_commons::ShipmentId;
use shiptrack_core::ShipmentService;
use std::sync::Arc;

use super::error_response;
use crate::models::{CreateShipmentRequest, ListShipmentsQuery, SuccessResponse, UpdateStatusRequest};

/// GET /api/shipments - List shipments, newest first.
///
/// Query parameters:
/// - `search`: substring match over tracking number, names, origin, destination
/// - `status`: exact status name ("All" disables the filter)
#[get("/shipments")]
pub async fn list_shipments(
    query: web::Query<ListShipmentsQuery>,
    service: web::Data<Arc<ShipmentService>>,
) -> impl Responder {
    match service
        .list_shipments(query.search.as_deref(), query.status.as_deref())
        .await
    {
        Ok(shipments) => HttpResponse::Ok().json(shipments),
        Err(e) => error_response(&e),
    }
}

/// GET /api/shipments/{id} - One shipment with its event history,
/// newest event first.
#[get("/shipments/{id}")]
pub async fn get_shipment(
    path: web::Path<String>,
    service: web::Data<Arc<ShipmentService>>,
) -> impl Responder {
    let id = ShipmentId::new(path.into_inner());
    match service.get_shipment(&id).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => error_response(&e),
    }
}

/// POST /api/shipments - Create a shipment.
///
/// # Example Request
/// ```json
/// {
///   "tracking_number": "TRK1",
///   "sender_name": "A",
///   "receiver_name": "B",
///   "origin": "X",
///   "destination": "Y"
/// }
/// ```
///
/// Responds 201 with the created shipment, 400 on missing fields,
/// 409 when the tracking number is already taken.
#[post("/shipments")]
pub async fn create_shipment(
    body: web::Json<CreateShipmentRequest>,
    service: web::Data<Arc<ShipmentService>>,
) -> impl Responder {
    match service.create_shipment(body.into_inner().into()).await {
        Ok(shipment) => HttpResponse::Created().json(shipment),
        Err(e) => error_response(&e),
    }
}

/// PATCH /api/shipments/{id}/status - Move a shipment to a new status and
/// record the transition event.
#[patch("/shipments/{id}/status")]
pub async fn update_status(
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
    service: web::Data<Arc<ShipmentService>>,
) -> impl Responder {
    let id = ShipmentId::new(path.into_inner());
    let body = body.into_inner();
    match service
        .update_status(&id, &body.status, body.location, body.notes)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse::ok()),
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/shipments/{id} - Delete a shipment and all its events.
#[delete("/shipments/{id}")]
pub async fn delete_shipment(
    path: web::Path<String>,
    service: web::Data<Arc<ShipmentService>>,
) -> impl Responder {
    let id = ShipmentId::new(path.into_inner());
    match service.delete_shipment(&id).await {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse::ok()),
        Err(e) => error_response(&e),
    }
}

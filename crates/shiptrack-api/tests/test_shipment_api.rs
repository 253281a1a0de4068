//! End-to-end tests for the REST surface: routing, status codes, and
//! response bodies over a memory-backed service.

use actix_web::{test, web, App};
use serde_json::{json, Value};
use shiptrack_api::routes;
use shiptrack_carrier::{CarrierClient, CarrierConfig};
use shiptrack_commons::SnowflakeGenerator;
use shiptrack_core::ShipmentService;
use shiptrack_store::MemoryStore;
use std::sync::Arc;

fn app_state() -> (web::Data<Arc<ShipmentService>>, web::Data<Arc<CarrierClient>>) {
    let service = Arc::new(ShipmentService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(SnowflakeGenerator::new(1)),
    ));
    let carrier = Arc::new(CarrierClient::new(CarrierConfig::new(None)));
    (web::Data::new(service), web::Data::new(carrier))
}

macro_rules! test_app {
    () => {{
        let (service, carrier) = app_state();
        test::init_service(
            App::new()
                .app_data(service)
                .app_data(carrier)
                .configure(routes::configure_routes),
        )
        .await
    }};
}

fn sample_shipment_body() -> Value {
    json!({
        "tracking_number": "TRK1",
        "sender_name": "A",
        "receiver_name": "B",
        "origin": "X",
        "destination": "Y"
    })
}

#[actix_web::test]
async fn test_full_shipment_lifecycle() {
    let app = test_app!();

    // Create
    let req = test::TestRequest::post()
        .uri("/api/shipments")
        .set_json(sample_shipment_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "Pending");
    assert_eq!(created["category"], "General");
    let id = created["id"].as_str().unwrap().to_string();

    // Update status
    let req = test::TestRequest::patch()
        .uri(&format!("/api/shipments/{}/status", id))
        .set_json(json!({
            "status": "Delivered",
            "location": "Warehouse 3",
            "notes": "left at door"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": true}));

    // Detail shows the new status and both events, newest first
    let req = test::TestRequest::get()
        .uri(&format!("/api/shipments/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let detail: Value = test::read_body_json(resp).await;
    assert_eq!(detail["status"], "Delivered");
    let events = detail["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["status"], "Delivered");
    assert_eq!(events[0]["location"], "Warehouse 3");
    assert_eq!(events[1]["status"], "Pending");

    // Delete, then the detail route answers 404
    let req = test::TestRequest::delete()
        .uri(&format!("/api/shipments/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/shipments/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_create_with_missing_fields_is_400() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shipments")
        .set_json(json!({"tracking_number": "TRK1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("sender_name"));
}

#[actix_web::test]
async fn test_duplicate_tracking_number_is_409() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shipments")
        .set_json(sample_shipment_body())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/shipments")
        .set_json(sample_shipment_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[actix_web::test]
async fn test_invalid_status_is_400_unknown_id_is_404() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shipments")
        .set_json(sample_shipment_body())
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/shipments/{}/status", id))
        .set_json(json!({"status": "Teleported"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::patch()
        .uri("/api/shipments/999/status")
        .set_json(json!({"status": "Delivered"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete()
        .uri("/api/shipments/999")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_list_filters_by_status_query() {
    let app = test_app!();

    for n in 1..=3 {
        let mut body = sample_shipment_body();
        body["tracking_number"] = json!(format!("TRK{}", n));
        let req = test::TestRequest::post()
            .uri("/api/shipments")
            .set_json(body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/api/shipments?status=Delivered")
        .to_request();
    let delivered: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(delivered.as_array().unwrap().len(), 0);

    let req = test::TestRequest::get()
        .uri("/api/shipments?search=trk2")
        .to_request();
    let hits: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["tracking_number"], "TRK2");
}

#[actix_web::test]
async fn test_stats_endpoint_shape() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shipments")
        .set_json(sample_shipment_body())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::get().uri("/api/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let stats: Value = test::read_body_json(resp).await;
    assert_eq!(stats["totals"]["total"], 1);
    assert_eq!(stats["totals"]["pending"], 1);
    assert_eq!(stats["totals"]["inTransit"], 0);
    assert_eq!(stats["statusCounts"][0]["status"], "Pending");
    assert_eq!(stats["dailyShipments"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_track_endpoint_without_provider_key() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/track/TRK-UNKNOWN")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["events"].as_array().unwrap().len(), 0);
    assert!(body["message"].as_str().unwrap().contains("not configured"));
}

#[actix_web::test]
async fn test_healthcheck() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/healthcheck").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

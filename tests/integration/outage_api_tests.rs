//! 停电接口测试

use crate::helpers::test_services;
use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

fn outage_body(start: &str, end: &str) -> Value {
    json!({
        "location": "Tema",
        "region": "Greater Accra",
        "startTime": start,
        "estimatedEndTime": end,
        "cause": "Scheduled maintenance",
        "status": "scheduled",
        "affectedUsers": 3000
    })
}

#[actix_web::test]
async fn test_create_update_resolve_flow() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::post()
        .uri("/api/outages")
        .set_json(outage_body("2024-05-02T08:00:00Z", "2024-05-02T12:00:00Z"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["outage"]["status"], "scheduled");
    let id = body["outage"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/outages/{}", id))
        .set_json(json!({ "status": "active" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["outage"]["status"], "active");

    let req = test::TestRequest::get()
        .uri("/api/outages/active?region=accra")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/outages/{}/resolve", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["outage"]["status"], "resolved");
    assert!(body["outage"]["actualEndTime"].is_string());

    let req = test::TestRequest::patch()
        .uri(&format!("/api/outages/{}/resolve", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/outages/{}", id))
        .set_json(json!({ "status": "active" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Outage is already resolved");
}

#[actix_web::test]
async fn test_end_before_start_rejected() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::post()
        .uri("/api/outages")
        .set_json(outage_body("2024-05-02T08:00:00Z", "2024-05-02T06:00:00Z"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("estimatedEndTime"));
}

#[actix_web::test]
async fn test_missing_start_time() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let mut body = outage_body("2024-05-02T08:00:00Z", "2024-05-02T12:00:00Z");
    body.as_object_mut().unwrap().remove("startTime");

    let req = test::TestRequest::post()
        .uri("/api/outages")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["error"], "\"startTime\" is required");
}

#[actix_web::test]
async fn test_list_filters_by_status() {
    let services = test_services("/nonexistent/regions.csv");
    services.seed_demo_data().await.unwrap();
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/outages?status=active")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["pagination"]["totalItems"], 2);
    for outage in body["data"].as_array().unwrap() {
        assert_eq!(outage["status"], "active");
    }
}

#[actix_web::test]
async fn test_seeded_stats() {
    let services = test_services("/nonexistent/regions.csv");
    services.seed_demo_data().await.unwrap();
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/api/outages/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["stats"]["total"], 4);
    assert_eq!(body["stats"]["resolved"], 1);
    assert_eq!(body["stats"]["avgDurationMinutes"], 60);
}

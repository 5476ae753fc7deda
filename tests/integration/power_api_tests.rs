//! 设备读数接口测试

use crate::helpers::test_services;
use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

fn reading_body(location: &str, voltage: f64, frequency: f64) -> Value {
    json!({
        "voltage": voltage,
        "frequency": frequency,
        "current": 12.5,
        "power": 2800.0,
        "location": location,
        "region": "Greater Accra",
        "deviceId": "meter-07"
    })
}

#[actix_web::test]
async fn test_submit_healthy_reading_has_null_alerts() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::post()
        .uri("/api/power/reading")
        .set_json(reading_body("Osu", 230.0, 50.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reading"]["deviceId"], "meter-07");
    assert_eq!(body["alerts"], Value::Null);
}

#[actix_web::test]
async fn test_submit_unstable_reading_returns_alerts() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::post()
        .uri("/api/power/reading")
        .set_json(reading_body("Osu", 195.0, 48.5))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["type"], "undervoltage");
    assert_eq!(alerts[0]["severity"], "high");
    assert_eq!(alerts[1]["type"], "frequency_instability");
}

#[actix_web::test]
async fn test_submit_rejects_out_of_range_frequency() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::post()
        .uri("/api/power/reading")
        .set_json(reading_body("Osu", 230.0, 60.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "\"frequency\" must be between 48 and 52");
}

#[actix_web::test]
async fn test_current_and_location_queries() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    for (location, voltage) in [("Osu", 228.0), ("Osu", 232.0), ("Labadi", 229.0)] {
        let req = test::TestRequest::post()
            .uri("/api/power/reading")
            .set_json(reading_body(location, voltage, 50.0))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/power/current").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 2);
    assert!(body["timestamp"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/power/location/Osu?limit=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["location"], "Osu");
    assert_eq!(body["count"], 1);

    let req = test::TestRequest::get()
        .uri("/api/power/history?location=osu")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);
}

#[actix_web::test]
async fn test_unknown_location_is_404() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power/location/Nowhere")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No readings found for this location");
}

#[actix_web::test]
async fn test_history_rejects_reversed_dates() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power/history?startDate=2024-05-02T00:00:00Z&endDate=2024-05-01T00:00:00Z")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_stats_with_no_readings() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power/stats?period=6h")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["period"], "6h");
    assert_eq!(body["stats"]["totalReadings"], 0);
}

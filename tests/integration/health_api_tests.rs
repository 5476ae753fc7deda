//! 健康检查接口测试

use crate::helpers::{test_services, write_csv, SAMPLE_ROWS};
use actix_web::{http::StatusCode, test};
use serde_json::Value;

#[actix_web::test]
async fn test_live_always_ok() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_ready_when_source_readable() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["ready"], true);
}

#[actix_web::test]
async fn test_not_ready_without_source() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ready"], false);
    assert_eq!(body["dataSource"], false);
}

#[actix_web::test]
async fn test_health_reports_degraded_source() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "degraded");
    assert_eq!(body["dataSource"]["status"], "unhealthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_request_id_is_echoed() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/health/live")
        .insert_header(("X-Request-ID", "req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
}

#[actix_web::test]
async fn test_request_id_is_generated() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;

    let id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(id.len(), 36);
}

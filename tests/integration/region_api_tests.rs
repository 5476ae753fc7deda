//! 区域数据接口测试

use crate::helpers::{test_services, write_csv, SAMPLE_ROWS};
use actix_web::{http::StatusCode, test};
use serde_json::Value;

#[actix_web::test]
async fn test_list_regions_is_plain_array() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/api/power-data").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let regions = body.as_array().unwrap();
    assert_eq!(regions.len(), 3);
    assert_eq!(regions[0]["regionName"], "Greater Accra");
    assert_eq!(regions[0]["powerStability"], 92);
    assert_eq!(regions[0]["activeOutages"][0]["location"], "Osu");
}

#[actix_web::test]
async fn test_list_regions_empty_when_source_missing() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/api/power-data").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, Value::Array(Vec::new()));
}

#[actix_web::test]
async fn test_report_distinguishes_missing_source() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/api/power-data/report").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["sourceAvailable"], false);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_report_lists_parse_warnings() {
    let csv = write_csv(&["Volta,50.0,230.0", SAMPLE_ROWS[1]]);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/api/power-data/report").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["sourceAvailable"], true);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["warnings"][0]["field"], "row");
    assert_eq!(body["warnings"][0]["line"], 2);
}

#[actix_web::test]
async fn test_region_detail_with_status_and_alerts() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power-data/regions/ashanti")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["region"]["regionName"], "Ashanti");
    assert_eq!(body["data"]["status"]["voltage"]["status"], "Dangerous");
    assert_eq!(body["data"]["status"]["stability"]["status"], "Poor");
    assert_eq!(
        body["data"]["alerts"][0],
        "UNDERVOLTAGE: Risk of appliance malfunction in Ashanti"
    );
}

#[actix_web::test]
async fn test_region_name_with_space() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power-data/regions/Greater%20Accra")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["region"]["regionName"], "Greater Accra");
}

#[actix_web::test]
async fn test_unknown_region_is_404() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power-data/regions/Atlantis")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Region not found");
}

#[actix_web::test]
async fn test_region_detail_without_source_is_503() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power-data/regions/Ashanti")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_trends_length_and_clamps() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    for (range, expected) in [("24h", 24), ("7d", 28), ("30d", 30), ("bogus", 24)] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/power-data/trends?range={}", range))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let points = body.as_array().unwrap();
        assert_eq!(points.len(), expected, "range {}", range);
        for p in points {
            let voltage = p["voltage"].as_f64().unwrap();
            let frequency = p["frequency"].as_f64().unwrap();
            let stability = p["stability"].as_f64().unwrap();
            assert!((200.0..=260.0).contains(&voltage));
            assert!((48.0..=52.0).contains(&frequency));
            assert!((0.0..=100.0).contains(&stability));
        }
    }
}

#[actix_web::test]
async fn test_trends_for_single_region() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power-data/trends?region=Northern&range=7d")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    for p in body.as_array().unwrap() {
        let voltage = p["voltage"].as_f64().unwrap();
        assert!((voltage - 226.0).abs() <= 5.0);
    }
}

#[actix_web::test]
async fn test_trends_unknown_region_is_404() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/power-data/trends?region=Atlantis")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_trends_empty_without_source() {
    let services = test_services("/nonexistent/regions.csv");
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/api/power-data/trends").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, Value::Array(Vec::new()));
}

#[actix_web::test]
async fn test_outage_board() {
    let csv = write_csv(SAMPLE_ROWS);
    let services = test_services(csv.path().to_str().unwrap());
    let app = test_app!(services);

    let req = test::TestRequest::get().uri("/api/power-data/outages").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["active"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["active"][0]["id"], "Greater Accra-Osu-active");
    assert_eq!(body["active"][0]["affectedUsers"], 15000);
    assert_eq!(body["scheduled"][0]["status"], "scheduled");
    assert_eq!(body["scheduled"][0]["estimatedDuration"], "4h");
}

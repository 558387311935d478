//! HTTP API integration tests
//!
//! Exercises the axum router end-to-end against the deterministic
//! in-memory place lookup, so no network access is required.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use kippo::places::StaticPlaceLookup;
use kippo::{server, Coordinates, PlaceRecord};

const CENTER: Coordinates = Coordinates {
    lat: 35.4437,
    lng: 139.638,
};

fn place(name: &str, lat: f64, lng: f64) -> PlaceRecord {
    PlaceRecord {
        name: name.to_string(),
        address: format!("{} address", name),
        lat,
        lng,
    }
}

/// Router over a fixture with places in several directions around Yokohama.
///
/// Birth year 1978 gives 四緑木星 with favorable directions N, E, SE, NW.
fn test_app() -> Router {
    let lookup = StaticPlaceLookup::new(
        CENTER,
        vec![
            place("北の神社", 35.53, 139.638),
            place("東の寺", 35.4437, 139.75),
            place("南の神社", 35.35, 139.638),
            place("すぐ北の神社", 35.46, 139.638),
        ],
    );
    server::router(Arc::new(lookup))
}

fn failing_app() -> Router {
    server::router(Arc::new(StaticPlaceLookup::failing()))
}

async fn get(app: Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_base_info() {
    let (status, body) = post(
        test_app(),
        "/fortune/base-info",
        json!({"birthDate": "1978-03-10"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["star"], "四緑木星");
}

#[tokio::test]
async fn test_base_info_missing_birth_date() {
    let (status, body) = post(test_app(), "/fortune/base-info", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("birthDate"));
}

#[tokio::test]
async fn test_base_info_invalid_date() {
    let (status, _) = post(
        test_app(),
        "/fortune/base-info",
        json!({"birthDate": "not-a-date"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_base_info_year_out_of_range() {
    let (status, body) = post(
        test_app(),
        "/fortune/base-info",
        json!({"birthDate": "1899-12-31"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("1899"));
}

#[tokio::test]
async fn test_lucky_directions() {
    let (status, body) = post(
        test_app(),
        "/fortune/lucky-directions",
        json!({"star": "四緑木星", "yearMonth": "2025-02"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["directions"], json!(["N", "E", "SE", "NW"]));
}

#[tokio::test]
async fn test_lucky_directions_unknown_star() {
    let (status, body) = post(
        test_app(),
        "/fortune/lucky-directions",
        json!({"star": "十星"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_lucky_directions_malformed_year_month() {
    let (status, _) = post(
        test_app(),
        "/fortune/lucky-directions",
        json!({"star": "四緑木星", "yearMonth": "2025-13"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_end_to_end() {
    let (status, body) = post(
        test_app(),
        "/fortune/recommendations",
        json!({
            "birthDate": "1978-03-10",
            "address": "神奈川県横浜市",
            "radiusKm": 20
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["star"], "四緑木星");
    assert_eq!(body["luckyDirections"], json!(["N", "E", "SE", "NW"]));
    assert_eq!(body["center"]["lat"], CENTER.lat);

    let candidates = body["candidates"].as_array().unwrap();
    // The southern shrine is filtered out.
    assert_eq!(candidates.len(), 3);
    for candidate in candidates {
        let direction = candidate["direction8"].as_str().unwrap();
        assert!(["N", "E", "SE", "NW"].contains(&direction));
        assert!(candidate["distanceKm"].is_number());
    }

    // Sorted ascending by distance.
    let distances: Vec<f64> = candidates
        .iter()
        .map(|c| c["distanceKm"].as_f64().unwrap())
        .collect();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(candidates[0]["name"], "すぐ北の神社");
}

#[tokio::test]
async fn test_recommendations_default_radius() {
    let (status, body) = post(
        test_app(),
        "/fortune/recommendations",
        json!({"birthDate": "1978-03-10", "address": "神奈川県横浜市"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["candidates"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendations_missing_address() {
    let (status, body) = post(
        test_app(),
        "/fortune/recommendations",
        json!({"birthDate": "1978-03-10"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("address"));
}

#[tokio::test]
async fn test_recommendations_radius_out_of_range() {
    for radius in [0.5, 150.0] {
        let (status, body) = post(
            test_app(),
            "/fortune/recommendations",
            json!({
                "birthDate": "1978-03-10",
                "address": "神奈川県横浜市",
                "radiusKm": radius
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "radius {}", radius);
        assert!(body["message"].as_str().unwrap().contains("radiusKm"));
    }
}

#[tokio::test]
async fn test_recommendations_lookup_failure_is_500() {
    let (status, body) = post(
        failing_app(),
        "/fortune/recommendations",
        json!({"birthDate": "1978-03-10", "address": "存在しない住所"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert!(body.get("candidates").is_none());
}

#[tokio::test]
async fn test_unknown_route_echoes_method_and_path() {
    let (status, body) = get(test_app(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Cannot GET /nope");
}

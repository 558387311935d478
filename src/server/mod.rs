//! HTTP surface
//!
//! Stateless axum router exposing the fortune endpoints over JSON:
//!
//! - `POST /fortune/base-info` — birth date → base star
//! - `POST /fortune/lucky-directions` — star → favorable octants
//! - `POST /fortune/recommendations` — full pipeline
//! - `GET /health` — liveness payload
//!
//! Error bodies are `{error, message}`: 400 for invalid input, 500 for
//! upstream lookup failures, 404 for unmatched routes echoing method+path.
//!
//! The router is generic over the `PlaceLookup` implementation so tests run
//! against the deterministic fake with no network access.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{KippoError, Result};
use crate::fortune::{compute_star, favorable_directions, parse_birth_date, Star};
use crate::pipeline::{self, Recommendation, DEFAULT_RADIUS_KM};
use crate::places::PlaceLookup;

/// Shared request state
pub struct AppState<L> {
    lookup: Arc<L>,
}

impl<L> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

/// Error wrapper mapping the kippo taxonomy onto HTTP statuses
struct ApiError(KippoError);

impl From<KippoError> for ApiError {
    fn from(err: KippoError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label) = match &self.0 {
            KippoError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "Bad Request"),
            KippoError::LookupFailed { .. } | KippoError::Config { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        if status.is_server_error() {
            error!(message = %self.0, "request failed");
        }

        (
            status,
            Json(json!({
                "error": label,
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BaseInfoRequest {
    birth_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuckyDirectionsRequest {
    star: Option<String>,
    year_month: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationsRequest {
    birth_date: Option<String>,
    address: Option<String>,
    year_month: Option<String>,
    radius_km: Option<f64>,
}

fn require<T>(value: Option<T>, field: &str) -> std::result::Result<T, ApiError> {
    value.ok_or_else(|| ApiError(KippoError::invalid_input(format!("{} is required", field))))
}

/// POST /fortune/base-info
async fn base_info(
    Json(request): Json<BaseInfoRequest>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let birth_date = require(request.birth_date, "birthDate")?;
    let star = compute_star(parse_birth_date(&birth_date)?)?;
    Ok(Json(json!({ "star": star })))
}

/// POST /fortune/lucky-directions
async fn lucky_directions(
    Json(request): Json<LuckyDirectionsRequest>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let star_name = require(request.star, "star")?;
    let star = Star::from_name(&star_name)?;
    let directions = favorable_directions(star, request.year_month.as_deref())?;
    Ok(Json(json!({ "directions": directions })))
}

/// POST /fortune/recommendations
async fn recommendations<L: PlaceLookup>(
    State(state): State<AppState<L>>,
    Json(request): Json<RecommendationsRequest>,
) -> std::result::Result<Json<Recommendation>, ApiError> {
    let birth_date = require(request.birth_date, "birthDate")?;
    let address = require(request.address, "address")?;
    let radius_km = request.radius_km.unwrap_or(DEFAULT_RADIUS_KM);

    let result = pipeline::recommend(
        state.lookup.as_ref(),
        parse_birth_date(&birth_date)?,
        &address,
        request.year_month.as_deref(),
        radius_km,
    )
    .await?;

    Ok(Json(result))
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "kippo API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Fallback for unmatched routes
async fn not_found(method: Method, uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": format!("Cannot {} {}", method, uri.path()),
        })),
    )
        .into_response()
}

/// Build the application router around a place lookup implementation
pub fn router<L: PlaceLookup + 'static>(lookup: Arc<L>) -> Router {
    Router::new()
        .route("/fortune/base-info", post(base_info))
        .route("/fortune/lucky-directions", post(lucky_directions))
        .route("/fortune/recommendations", post(recommendations))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(AppState { lookup })
}

/// CORS layer restricted to the configured frontend origin
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|_| KippoError::config(format!("invalid CORS origin: {}", origin)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Bind and serve the API until the process is stopped
pub async fn serve<L: PlaceLookup + 'static>(config: &Config, lookup: Arc<L>) -> Result<()> {
    let app = router(lookup).layer(cors_layer(&config.cors_origin)?);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| KippoError::config(format!("failed to bind {}: {}", addr, e)))?;

    info!("kippo API listening on http://{}", addr);
    info!("  GET  /health                      - health check");
    info!("  POST /fortune/base-info           - base star from birth date");
    info!("  POST /fortune/lucky-directions    - favorable directions for a star");
    info!("  POST /fortune/recommendations     - shrine/temple recommendations");

    axum::serve(listener, app)
        .await
        .map_err(|e| KippoError::config(format!("server error: {}", e)))
}

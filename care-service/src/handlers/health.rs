use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use service_core::response::ApiResponse;

pub async fn root() -> impl IntoResponse {
    ApiResponse::message("Welcome to the Care Portal API")
}

/// Liveness probe; also reports whether MongoDB answers a ping.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(_) => ApiResponse::ok(
            "Server is Running",
            json!({
                "status": "ok",
                "service": "care-service",
                "version": env!("CARGO_PKG_VERSION")
            }),
        )
        .into_response(),
        Err(_) => ApiResponse::failure(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
            .into_response(),
    }
}

pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub async fn not_found() -> impl IntoResponse {
    ApiResponse::failure(StatusCode::NOT_FOUND, "Route not found")
}

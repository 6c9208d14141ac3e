//! HTTP API handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::now_millis;

/// Greeting returned by `/api/hello`.
pub const HELLO_MESSAGE: &str = "Hello from Spring Boot Backend!";
/// Status reported by `/api/hello`.
pub const HELLO_STATUS: &str = "success";
/// Status reported by `/api/status`.
pub const RUNNING_STATUS: &str = "Backend is running";
/// Service identifier reported by `/api/status`.
pub const SERVICE_NAME: &str = "register-file-backend";

/// Application state shared with handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Prometheus render handle; `None` when metrics are disabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a Prometheus handle so `/metrics` can render it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Greeting response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HelloResponse {
    /// Greeting text.
    #[schema(value_type = String, example = "Hello from Spring Boot Backend!")]
    pub message: &'static str,
    /// Always "success".
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
}

/// Service status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Always "Backend is running".
    #[schema(value_type = String, example = "Backend is running")]
    pub status: &'static str,
    /// Wall-clock milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Service identifier.
    #[schema(value_type = String, example = "register-file-backend")]
    pub service: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
}

/// Greeting handler.
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "api",
    responses((status = 200, description = "Static greeting", body = HelloResponse))
)]
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: HELLO_MESSAGE,
        status: HELLO_STATUS,
    })
}

/// Status handler - reports liveness with the current timestamp.
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "api",
    responses((status = 200, description = "Service status", body = StatusResponse))
)]
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: RUNNING_STATUS,
        timestamp: now_millis(),
        service: SERVICE_NAME,
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "ops",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition handler - 404 when metrics are disabled.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "ops",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain"),
        (status = 404, description = "Metrics disabled")
    )
)]
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Fallback for requests that match no route.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

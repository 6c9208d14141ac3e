//! OpenAPI document for the HTTP surface.

use axum::Json;
use utoipa::OpenApi;

use super::handlers::{self, HealthResponse, HelloResponse, StatusResponse};

/// OpenAPI description of every route the service exposes.
#[derive(OpenApi)]
#[openapi(
    info(title = "register-file-backend", description = "Register-file backend HTTP API"),
    paths(handlers::hello, handlers::status, handlers::health, handlers::render_metrics),
    components(schemas(HelloResponse, StatusResponse, HealthResponse)),
    tags(
        (name = "api", description = "Informational endpoints"),
        (name = "ops", description = "Health and metrics")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

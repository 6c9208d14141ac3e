//! HTTP API route definitions.

use axum::{
    handler::Handler,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::docs::openapi_json;
use super::handlers::{health, hello, not_found, render_metrics, status, AppState};
use crate::metrics::track_metrics;

/// Routes mounted under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(hello))
        .route("/status", get(status))
}

/// Build the CORS layer. An empty origin list allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Create the API router.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        // Informational endpoints
        .nest("/api", api_routes())
        // Health and metrics
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        // Docs
        .route("/api-docs/openapi.json", get(openapi_json))
        .route_layer(middleware::from_fn(track_metrics))
        // Route layers skip the fallback; it carries its own tracking layer
        .fallback(not_found.layer(middleware::from_fn(track_metrics)))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(), &[])
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn hello_endpoint_returns_greeting() {
        let (status, body) = get_body(app(), "/api/hello").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"message":"Hello from Spring Boot Backend!","status":"success"}"#
        );
    }

    #[tokio::test]
    async fn status_endpoint_returns_running() {
        let (status, body) = get_body(app(), "/api/status").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "Backend is running");
        assert_eq!(json["service"], "register-file-backend");
        assert!(json["timestamp"].as_i64().unwrap() > 0);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let (status, body) = get_body(app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap(), r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn metrics_endpoint_returns_404_when_disabled() {
        let (status, _) = get_body(app(), "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let (status, _) = get_body(app(), "/api/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn requests_are_counted_by_matched_route() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = ::metrics::set_default_local_recorder(&recorder);

        let (hello_status, _) = get_body(app(), "/api/hello").await;
        let (missing_status, _) = get_body(app(), "/api/missing").await;
        assert_eq!(hello_status, StatusCode::OK);
        assert_eq!(missing_status, StatusCode::NOT_FOUND);

        let rendered = handle.render();
        assert!(
            rendered.contains(
                r#"http_requests_total{endpoint="/api/hello",method="GET",status="200"} 1"#
            ),
            "{rendered}"
        );
        assert!(
            rendered.contains(
                r#"http_requests_total{endpoint="unmatched",method="GET",status="404"} 1"#
            ),
            "{rendered}"
        );
    }

    #[tokio::test]
    async fn post_to_hello_is_method_not_allowed() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/hello")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = get_body(app(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"]["/api/hello"].is_object());
        assert!(json["paths"]["/api/status"].is_object());
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let app = create_router(AppState::new(), &["http://localhost:5173".to_string()]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn cors_rejects_unlisted_origin() {
        let app = create_router(AppState::new(), &["http://localhost:5173".to_string()]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}

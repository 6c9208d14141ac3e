//! Prometheus metrics for HTTP request tracking.
//!
//! Every routed request increments a counter labelled by matched route,
//! method and status, and records its latency in a histogram.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::{BackendError, Result};

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Histogram buckets for request latency, in milliseconds.
const LATENCY_BUCKETS_MS: &[f64] = &[0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0];

/// Label used when a request did not match any route.
const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Build a Prometheus recorder with the service's histogram buckets.
fn builder() -> Result<PrometheusBuilder> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(METRIC_HTTP_REQUEST_LATENCY.to_string()),
            LATENCY_BUCKETS_MS,
        )
        .map_err(|e| BackendError::Metrics(e.to_string()))
}

/// Install the global Prometheus recorder and register metric descriptions.
/// Call this once at startup; the returned handle renders `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = builder()?
        .install_recorder()
        .map_err(|e| BackendError::Metrics(e.to_string()))?;

    describe_metrics();
    debug!("Metrics initialized");

    Ok(handle)
}

fn describe_metrics() {
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
}

/// Record one served HTTP request.
pub fn record_http_request(start: Instant, endpoint: &str, method: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    counter!(
        METRIC_HTTP_REQUESTS,
        "endpoint" => endpoint.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// Axum middleware recording request count and latency per matched route.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_owned());
    let method = req.method().to_string();

    let response = next.run(req).await;

    record_http_request(start, &endpoint, &method, response.status().as_u16());
    response
}

//! Prometheus metrics
//!
//! Installs the global recorder and serves its rendering at `/metrics`.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics::counter;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::state::AppState;

pub const HTTP_REQUESTS_TOTAL: &str = "patio_http_requests_total";

/// Stage latency buckets, in milliseconds
const LATENCY_BUCKETS_MS: [f64; 14] = [
    5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 15000.0,
    30000.0, 60000.0,
];

/// Install the Prometheus recorder
///
/// Returns `None` when a recorder is already installed or the builder
/// rejects the bucket layout.
pub fn init_metrics() -> Option<PrometheusHandle> {
    let builder = match PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Suffix("_ms".to_string()), &LATENCY_BUCKETS_MS)
    {
        Ok(builder) => builder,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid histogram buckets");
            return None;
        }
    };

    match builder.install_recorder() {
        Ok(handle) => {
            patio_pipeline::metrics::describe();
            metrics::describe_counter!(HTTP_REQUESTS_TOTAL, "Chat requests answered, by status");
            Some(handle)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

/// Count one answered chat request
pub fn record_http_status(status: StatusCode) {
    counter!(HTTP_REQUESTS_TOTAL, "status" => status.as_u16().to_string()).increment(1);
}

/// Prometheus exposition endpoint
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            "metrics disabled\n".to_string(),
        ),
    }
}

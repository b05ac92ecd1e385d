//! Pipeline metrics
//!
//! Recorded through the `metrics` facade; the server installs the Prometheus
//! recorder. Without a recorder these calls are no-ops.

use metrics::{counter, describe_counter, describe_histogram, histogram};

use crate::orchestrator::Stage;

pub const STAGE_LATENCY_MS: &str = "patio_stage_latency_ms";
pub const PIPELINE_FAILURES_TOTAL: &str = "patio_pipeline_failures_total";
pub const PIPELINE_REQUESTS_TOTAL: &str = "patio_pipeline_requests_total";

/// Register metric descriptions
pub fn describe() {
    describe_histogram!(STAGE_LATENCY_MS, "Latency of each pipeline stage in milliseconds");
    describe_counter!(PIPELINE_FAILURES_TOTAL, "Pipeline runs aborted, by failing stage");
    describe_counter!(PIPELINE_REQUESTS_TOTAL, "Pipeline runs started, by input kind");
}

pub fn record_stage_latency(stage: Stage, elapsed_ms: u64) {
    histogram!(STAGE_LATENCY_MS, "stage" => stage.as_str()).record(elapsed_ms as f64);
}

pub fn record_failure(stage: Stage) {
    counter!(PIPELINE_FAILURES_TOTAL, "stage" => stage.as_str()).increment(1);
}

pub fn record_request(input: &'static str) {
    counter!(PIPELINE_REQUESTS_TOTAL, "input" => input).increment(1);
}

//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use patio_config::Settings;
use patio_pipeline::ChatPipeline;

/// Application state
///
/// Everything here is immutable after startup and shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub pipeline: Arc<ChatPipeline>,
    /// Set when the Prometheus recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: Settings, pipeline: ChatPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    pub fn get_config(&self) -> &Settings {
        &self.config
    }
}

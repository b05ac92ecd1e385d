//! Pat.io Server
//!
//! HTTP surface for the chat pipeline.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, metrics_handler};
pub use state::AppState;

use std::path::Path;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use patio_config::{ConfigError, Settings};
use patio_pipeline::{PipelineError, ValidationError};

/// Load the settings the server starts with
///
/// Absent config files are skipped by the loader, so an empty directory
/// yields the built-in defaults. A file or `PATIO__*` override that fails to
/// parse or validate is returned as an error and never replaced by defaults.
pub fn load_server_settings(
    dir: impl AsRef<Path>,
    env: Option<&str>,
) -> Result<Settings, ConfigError> {
    let dir = dir.as_ref();
    if let Some(name) = env {
        let has_file = ["yaml", "yml", "toml", "json"]
            .iter()
            .any(|ext| dir.join(format!("{}.{}", name, ext)).exists());
        if !has_file {
            // Tracing is not initialized yet
            eprintln!(
                "Warning: no config file for environment '{}' in {}",
                name,
                dir.display()
            );
        }
    }

    patio_config::load_settings_from(dir, env)
}

/// Message used when a failure carries no text of its own
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        ServerError::InvalidRequest(err.to_string())
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Pipeline(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text placed in the `error` field of the response body
    pub fn client_message(&self) -> String {
        let message = match self {
            ServerError::InvalidRequest(msg)
            | ServerError::PayloadTooLarge(msg)
            | ServerError::Internal(msg) => msg.as_str(),
            // The collaborator's own message, without the stage prefix
            ServerError::Pipeline(err) => err.source.message(),
        };

        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message.to_string()
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        err.status()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patio_pipeline::Stage;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::InvalidRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::PayloadTooLarge("too big".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ServerError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pipeline_message_is_collaborator_text() {
        let err = ServerError::from(PipelineError {
            stage: Stage::Synthesize,
            source: patio_core::Error::Tts("HTTP 403 Forbidden: API key not valid".into()),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "HTTP 403 Forbidden: API key not valid");
    }

    #[test]
    fn test_blank_message_falls_back() {
        let err = ServerError::from(PipelineError {
            stage: Stage::Complete,
            source: patio_core::Error::Llm("  ".into()),
        });
        assert_eq!(err.client_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_validation_error_conversion() {
        let err = ServerError::from(ValidationError::MissingField("userLanguage"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Missing required field: userLanguage");
    }
}

//! LLM integration for the Patio chat pipeline
//!
//! Features:
//! - OpenAI-compatible chat-completions backend (OpenAI, vLLM, local servers)
//! - Single-turn prompt construction (system prompt + one user message)
//! - Adapter to the core `LanguageModel` trait with reply sanitizing

pub mod adapter;
pub mod backend;
pub mod prompt;

pub use adapter::LanguageModelAdapter;
pub use backend::{FinishReason, GenerationResult, LlmBackend, OpenAIBackend, OpenAIConfig};
pub use prompt::{Message, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for patio_core::Error {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Configuration(msg) => patio_core::Error::Config(msg),
            LlmError::Api(msg) => patio_core::Error::Llm(msg),
            other => patio_core::Error::Llm(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: patio_core::Error =
            LlmError::Api("HTTP 429 Too Many Requests: insufficient_quota".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Completion error: HTTP 429 Too Many Requests: insufficient_quota"
        );

        let err: patio_core::Error = LlmError::Timeout.into();
        assert_eq!(err, patio_core::Error::Llm("Timeout".to_string()));
    }
}

//! Error types shared by every collaborator

use thiserror::Error;

/// Core error type
///
/// Each collaborator crate has its own error enum and converts into this one
/// at the trait boundary, so the orchestrator only ever sees `Error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Speech recognition error: {0}")]
    Stt(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Completion error: {0}")]
    Llm(String),

    #[error("Speech synthesis error: {0}")]
    Tts(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    /// The message carried by the variant, without the category prefix
    pub fn message(&self) -> &str {
        match self {
            Error::Stt(msg)
            | Error::Translation(msg)
            | Error::Llm(msg)
            | Error::Tts(msg)
            | Error::InvalidInput(msg)
            | Error::Config(msg)
            | Error::Network(msg) => msg,
        }
    }
}

/// Result alias used by the collaborator traits
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Translation("HTTP 403 Forbidden: quota".to_string());
        assert_eq!(err.to_string(), "Translation error: HTTP 403 Forbidden: quota");

        let err = Error::Llm("insufficient_quota".to_string());
        assert_eq!(err.to_string(), "Completion error: insufficient_quota");
        assert_eq!(err.message(), "insufficient_quota");
    }
}

//! Error types for text processing

use thiserror::Error;

/// Text processing errors
#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;

impl From<reqwest::Error> for TextProcessingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TextProcessingError::InvalidResponse(err.to_string())
        } else {
            TextProcessingError::Network(err.to_string())
        }
    }
}

impl From<TextProcessingError> for patio_core::Error {
    fn from(err: TextProcessingError) -> Self {
        match err {
            TextProcessingError::Config(msg) => patio_core::Error::Config(msg),
            TextProcessingError::Translation(msg) => patio_core::Error::Translation(msg),
            other => patio_core::Error::Translation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_core_translation_error() {
        let core: patio_core::Error =
            TextProcessingError::Translation("HTTP 400 Bad Request: bad target".to_string()).into();
        assert_eq!(
            core,
            patio_core::Error::Translation("HTTP 400 Bad Request: bad target".to_string())
        );

        let core: patio_core::Error = TextProcessingError::Network("timed out".to_string()).into();
        assert!(matches!(core, patio_core::Error::Translation(m) if m.contains("timed out")));
    }
}

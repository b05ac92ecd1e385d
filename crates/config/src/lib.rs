//! Configuration management for the Patio backend
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (PATIO__ prefix, `__` separator)
//! - A YAML prompt file for the completion engine's system prompt

pub mod constants;
pub mod prompts;
pub mod settings;

pub use prompts::PromptsConfig;
pub use settings::{
    load_settings, load_settings_from, GoogleAuth, GoogleConfig, LlmConfig, ObservabilityConfig, PipelineConfig,
    RuntimeEnvironment, ServerConfig, Settings, SpeechConfig, TranslationSettings, TtsConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for patio_core::Error {
    fn from(err: ConfigError) -> Self {
        patio_core::Error::Config(err.to_string())
    }
}

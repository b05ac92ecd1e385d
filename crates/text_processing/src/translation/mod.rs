//! Translation module
//!
//! The chat pipeline translates twice per request: the user's text into the
//! pivot language, and the assistant's reply back into the user's language.

mod google;
mod noop;

pub use google::{GoogleTranslator, GoogleTranslatorConfig};
pub use noop::NoopTranslator;

use patio_config::GoogleAuth;
use patio_core::Translator;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::{Result, TextProcessingError};

/// Translation configuration
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    /// Which provider to use
    pub provider: TranslationProvider,
    /// REST base URL for the Google provider
    pub endpoint: String,
    /// Google credentials
    pub auth: Option<GoogleAuth>,
    /// Request timeout
    pub timeout: Duration,
}

/// Translation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// Google Cloud Translation v2
    #[default]
    Google,
    /// Disabled (pass-through)
    #[serde(alias = "noop")]
    Disabled,
}

impl FromStr for TranslationProvider {
    type Err = TextProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "disabled" | "noop" => Ok(Self::Disabled),
            other => Err(TextProcessingError::Config(format!(
                "Unknown translation provider: {}",
                other
            ))),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let google = GoogleTranslatorConfig::default();
        Self {
            provider: TranslationProvider::Google,
            endpoint: google.endpoint,
            auth: None,
            timeout: google.timeout,
        }
    }
}

impl TranslationConfig {
    /// Build from application settings
    pub fn from_settings(settings: &patio_config::Settings) -> Result<Self> {
        Ok(Self {
            provider: settings.translation.provider.parse()?,
            endpoint: settings.translation.endpoint.clone(),
            auth: settings.google.auth(),
            timeout: Duration::from_secs(settings.translation.timeout_secs),
        })
    }
}

/// Create translator based on config
pub fn create_translator(config: &TranslationConfig) -> Result<Arc<dyn Translator>> {
    match config.provider {
        TranslationProvider::Google => {
            if config.auth.is_none() {
                tracing::warn!("No Google credentials configured; translation requests will be rejected");
            }
            let translator = GoogleTranslator::new(GoogleTranslatorConfig {
                endpoint: config.endpoint.clone(),
                auth: config.auth.clone(),
                timeout: config.timeout,
            })?;
            tracing::info!(endpoint = %config.endpoint, "Using Google translator");
            Ok(Arc::new(translator))
        }
        TranslationProvider::Disabled => {
            tracing::info!("Translation disabled, using pass-through translator");
            Ok(Arc::new(NoopTranslator::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TranslationConfig::default();
        assert_eq!(config.provider, TranslationProvider::Google);
        assert!(config.endpoint.starts_with("https://translation.googleapis.com"));
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
        assert_eq!(" Disabled ".parse::<TranslationProvider>().unwrap(), TranslationProvider::Disabled);
        assert!("indictrans2".parse::<TranslationProvider>().is_err());

        let p: TranslationProvider = serde_json::from_str("\"noop\"").unwrap();
        assert_eq!(p, TranslationProvider::Disabled);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = patio_config::Settings::default();
        settings.translation.provider = "disabled".to_string();
        settings.google.api_key = Some("AIza-test".to_string());

        let config = TranslationConfig::from_settings(&settings).unwrap();
        assert_eq!(config.provider, TranslationProvider::Disabled);
        assert_eq!(config.auth, Some(GoogleAuth::ApiKey("AIza-test".to_string())));
    }

    #[tokio::test]
    async fn test_create_disabled_translator() {
        let config = TranslationConfig {
            provider: TranslationProvider::Disabled,
            ..Default::default()
        };
        let translator = create_translator(&config).unwrap();
        assert_eq!(translator.name(), "noop");
        let target = patio_core::LanguageTag::parse("fr").unwrap();
        assert_eq!(translator.translate("bonjour", &target).await.unwrap(), "bonjour");
    }

    #[test]
    fn test_create_google_translator() {
        let translator = create_translator(&TranslationConfig::default()).unwrap();
        assert_eq!(translator.name(), "google-translate-v2");
    }
}

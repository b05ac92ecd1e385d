//! Google Cloud Translation (v2 REST)
//!
//! `POST {endpoint}/language/translate/v2` with `{q, target, format}`. The
//! source language is left out so the service detects it.

use async_trait::async_trait;
use patio_config::GoogleAuth;
use patio_core::{LanguageTag, Translator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{Result, TextProcessingError};

/// Google translator configuration
#[derive(Debug, Clone)]
pub struct GoogleTranslatorConfig {
    /// REST base URL
    pub endpoint: String,
    /// Credentials (requests go out unauthenticated when absent)
    pub auth: Option<GoogleAuth>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GoogleTranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: patio_config::constants::endpoints::GOOGLE_TRANSLATE.to_string(),
            auth: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

/// Translator backed by Google Cloud Translation v2
pub struct GoogleTranslator {
    config: GoogleTranslatorConfig,
    client: reqwest::Client,
}

impl GoogleTranslator {
    pub fn new(config: GoogleTranslatorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TextProcessingError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!(
            "{}/language/translate/v2",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    async fn request(&self, text: &str, target: &LanguageTag) -> Result<String> {
        let body = TranslateRequest {
            q: text,
            target: target.as_str(),
            format: "text",
        };

        let mut builder = self.client.post(self.url()).json(&body);
        if let Some(auth) = &self.config.auth {
            if let Some(param) = auth.query_param() {
                builder = builder.query(&[param]);
            }
            if let Some(token) = auth.bearer_token() {
                builder = builder.bearer_auth(token);
            }
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TextProcessingError::Translation(format!("HTTP {}: {}", status, body)));
        }

        let parsed: TranslateResponse = response.json().await?;
        first_translation(parsed)
    }
}

fn first_translation(response: TranslateResponse) -> Result<String> {
    let translation = response
        .data
        .translations
        .into_iter()
        .next()
        .ok_or_else(|| TextProcessingError::InvalidResponse("No translations returned".to_string()))?;

    if let Some(source) = &translation.detected_source_language {
        tracing::trace!(detected_source = %source, "Translation source detected");
    }

    Ok(translation.translated_text)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &LanguageTag) -> patio_core::Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let translated = self.request(text, target).await?;
        tracing::debug!(
            target_language = %target,
            input_chars = text.len(),
            output_chars = translated.len(),
            "Translated text"
        );
        Ok(translated)
    }

    fn name(&self) -> &str {
        "google-translate-v2"
    }
}

//! Chat request and response types
//!
//! The wire format uses camelCase field names:
//!
//! ```json
//! { "message": "Hello", "audioInput": null, "userLanguage": "es-US", "targetLanguage": "en-US" }
//! ```
//!
//! `audioInput` is either a base64 string or a JSON array of bytes.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use patio_core::{LanguageTag, LanguageTagError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard alphabet, padding optional
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Incoming chat request, as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Typed user text
    #[serde(default)]
    pub message: Option<String>,

    /// Recorded audio (LINEAR16, 16 kHz, mono)
    #[serde(default)]
    pub audio_input: Option<AudioPayload>,

    /// Language the user speaks and wants the answer in
    #[serde(default)]
    pub user_language: Option<String>,

    /// Pivot language sent to the completion engine
    #[serde(default)]
    pub target_language: Option<String>,
}

/// Audio bytes as they appear in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AudioPayload {
    /// Base64 text, optionally a `data:...;base64,` URL
    Base64(String),
    /// Array of byte values
    Bytes(Vec<u8>),
}

impl AudioPayload {
    /// Decode to raw bytes; `None` when the payload is empty
    pub fn decode(&self) -> Result<Option<Vec<u8>>, ValidationError> {
        let bytes = match self {
            AudioPayload::Bytes(bytes) => bytes.clone(),
            AudioPayload::Base64(text) => {
                let encoded = strip_data_url(text.trim());
                let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
                LENIENT_BASE64
                    .decode(compact.as_bytes())
                    .map_err(|e| ValidationError::InvalidAudio(e.to_string()))?
            }
        };

        Ok((!bytes.is_empty()).then_some(bytes))
    }
}

fn strip_data_url(text: &str) -> &str {
    if !text.starts_with("data:") {
        return text;
    }
    match text.find(";base64,") {
        Some(idx) => &text[idx + ";base64,".len()..],
        None => text,
    }
}

/// Validation failures; none of these reach a collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {source}")]
    InvalidLanguageTag {
        field: &'static str,
        #[source]
        source: LanguageTagError,
    },

    #[error("Invalid audioInput: {0}")]
    InvalidAudio(String),

    #[error("Either message or audioInput is required")]
    MissingUtterance,
}

/// What the user said
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance {
    /// Typed text, passed through untouched (may be empty)
    Text(String),
    /// Recorded audio to transcribe
    Audio(Vec<u8>),
}

impl Utterance {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Utterance::Text(_) => "text",
            Utterance::Audio(_) => "audio",
        }
    }
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub input: Utterance,
    pub user_language: LanguageTag,
    pub target_language: LanguageTag,
}

impl ChatRequest {
    /// Check preconditions and resolve the input to use
    ///
    /// Audio takes precedence over `message` when both are present. An empty
    /// string `message` is a legal input.
    pub fn validate(self) -> Result<ValidatedRequest, ValidationError> {
        let user_language = parse_language("userLanguage", self.user_language)?;
        let target_language = parse_language("targetLanguage", self.target_language)?;

        let audio = match &self.audio_input {
            Some(payload) => payload.decode()?,
            None => None,
        };

        let input = match (audio, self.message) {
            (Some(bytes), _) => Utterance::Audio(bytes),
            (None, Some(text)) => Utterance::Text(text),
            (None, None) => return Err(ValidationError::MissingUtterance),
        };

        Ok(ValidatedRequest {
            input,
            user_language,
            target_language,
        })
    }
}

fn parse_language(
    field: &'static str,
    value: Option<String>,
) -> Result<LanguageTag, ValidationError> {
    let raw = value.unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    LanguageTag::parse(&raw).map_err(|source| ValidationError::InvalidLanguageTag { field, source })
}

/// Successful chat response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Reply in the user's language
    pub text_response: String,

    /// Base64 speech for `text_response`, when synthesis ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_response: Option<String>,
}

//! Google Cloud Speech-to-Text (v1 REST)
//!
//! Uses the synchronous `speech:recognize` method, which accepts up to about
//! a minute of audio inline as base64.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use patio_config::GoogleAuth;
use patio_core::{AudioEncoding, Error, LanguageTag, Result, SpeechToText, TranscriptResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::google;

/// Google STT configuration
#[derive(Debug, Clone)]
pub struct GoogleSttConfig {
    /// REST base URL
    pub endpoint: String,
    /// Credentials
    pub auth: Option<GoogleAuth>,
    /// Input encoding
    pub encoding: AudioEncoding,
    /// Input sample rate
    pub sample_rate_hz: u32,
    /// Recognition model (provider default when `None`)
    pub model: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GoogleSttConfig {
    fn default() -> Self {
        Self {
            endpoint: patio_config::constants::endpoints::GOOGLE_SPEECH.to_string(),
            auth: None,
            encoding: AudioEncoding::Linear16,
            sample_rate_hz: patio_config::constants::audio::SAMPLE_RATE_HZ,
            model: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl GoogleSttConfig {
    /// Build from application settings
    pub fn from_settings(settings: &patio_config::Settings) -> Self {
        Self {
            endpoint: settings.speech.endpoint.clone(),
            auth: settings.google.auth(),
            encoding: settings.speech.encoding,
            sample_rate_hz: settings.speech.sample_rate_hz,
            model: settings.speech.model.clone(),
            timeout: Duration::from_secs(settings.speech.timeout_secs),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechRecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct SpeechRecognitionResult {
    #[serde(default)]
    alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct SpeechRecognitionAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

impl RecognizeResponse {
    /// Best alternative of each result, in order
    fn into_transcripts(self) -> Vec<TranscriptResult> {
        self.results
            .into_iter()
            .filter_map(|r| r.alternatives.into_iter().next())
            .map(|alt| {
                let result = TranscriptResult::new(alt.transcript);
                match alt.confidence {
                    Some(c) => result.with_confidence(c),
                    None => result,
                }
            })
            .collect()
    }
}

/// Speech recognizer backed by Google Cloud Speech-to-Text
pub struct GoogleSpeechToText {
    config: GoogleSttConfig,
    client: reqwest::Client,
}

impl GoogleSpeechToText {
    pub fn new(config: GoogleSttConfig) -> Result<Self> {
        let client = google::client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!("{}/v1/speech:recognize", self.config.endpoint.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, audio: &[u8], language: &'a LanguageTag) -> RecognizeRequest<'a> {
        RecognizeRequest {
            config: RecognitionConfig {
                encoding: self.config.encoding.as_str(),
                sample_rate_hertz: self.config.sample_rate_hz,
                language_code: language.as_str(),
                model: self.config.model.as_deref(),
            },
            audio: RecognitionAudio {
                content: BASE64.encode(audio),
            },
        }
    }
}

#[async_trait]
impl SpeechToText for GoogleSpeechToText {
    async fn transcribe(&self, audio: &[u8], language: &LanguageTag) -> Result<Vec<TranscriptResult>> {
        let body = self.build_request(audio, language);

        let response = google::authorize(self.client.post(self.url()), self.config.auth.as_ref())
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Speech request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Stt(google::http_error(response).await));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| Error::Stt(format!("Invalid recognize response: {}", e)))?;

        let transcripts = parsed.into_transcripts();
        tracing::debug!(
            language = %language,
            audio_bytes = audio.len(),
            results = transcripts.len(),
            "Speech recognized"
        );
        Ok(transcripts)
    }

    fn model_name(&self) -> &str {
        self.config.model.as_deref().unwrap_or("google-speech-v1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stt() -> GoogleSpeechToText {
        GoogleSpeechToText::new(GoogleSttConfig::default()).unwrap()
    }

    #[test]
    fn test_request_body() {
        let stt = stt();
        let lang = LanguageTag::parse("es-US").unwrap();
        let body = serde_json::to_value(stt.build_request(&[0, 1, 2], &lang)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "config": {
                    "encoding": "LINEAR16",
                    "sampleRateHertz": 16000,
                    "languageCode": "es-US"
                },
                "audio": { "content": "AAEC" }
            })
        );
    }

    #[test]
    fn test_url() {
        assert_eq!(stt().url(), "https://speech.googleapis.com/v1/speech:recognize");
    }

    #[test]
    fn test_results_joined_in_order() {
        let raw = r#"{
            "results": [
                {"alternatives": [{"transcript": "what is an ITIN", "confidence": 0.93},
                                  {"transcript": "what is a tin"}]},
                {"alternatives": []},
                {"alternatives": [{"transcript": "and who needs one"}]}
            ]
        }"#;
        let parsed: RecognizeResponse = serde_json::from_str(raw).unwrap();
        let transcripts = parsed.into_transcripts();

        assert_eq!(transcripts.len(), 2);
        assert_eq!(transcripts[0].text, "what is an ITIN");
        assert_eq!(transcripts[0].confidence, Some(0.93));
        assert_eq!(transcripts[1].text, "and who needs one");
        assert_eq!(
            patio_core::join_transcripts(&transcripts),
            "what is an ITIN\nand who needs one"
        );
    }

    #[test]
    fn test_no_speech() {
        let parsed: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_transcripts().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let stt = GoogleSpeechToText::new(GoogleSttConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(200),
            ..Default::default()
        })
        .unwrap();
        let lang = LanguageTag::parse("en").unwrap();
        assert!(matches!(
            stt.transcribe(&[0, 0], &lang).await,
            Err(Error::Network(_))
        ));
    }
}

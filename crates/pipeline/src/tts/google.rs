//! Google Cloud Text-to-Speech (v1 REST)

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use patio_config::GoogleAuth;
use patio_core::{AudioClip, AudioEncoding, Error, Result, TextToSpeech, VoiceConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::google;

/// Google TTS configuration
#[derive(Debug, Clone)]
pub struct GoogleTtsConfig {
    /// REST base URL
    pub endpoint: String,
    /// Credentials
    pub auth: Option<GoogleAuth>,
    /// Output container format
    pub audio_encoding: AudioEncoding,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self {
            endpoint: patio_config::constants::endpoints::GOOGLE_TTS.to_string(),
            auth: None,
            audio_encoding: AudioEncoding::Mp3,
            timeout: Duration::from_secs(30),
        }
    }
}

impl GoogleTtsConfig {
    /// Build from application settings
    pub fn from_settings(settings: &patio_config::Settings) -> Self {
        Self {
            endpoint: settings.tts.endpoint.clone(),
            auth: settings.google.auth(),
            audio_encoding: settings.tts.audio_encoding,
            timeout: Duration::from_secs(settings.tts.timeout_secs),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: &'a str,
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

/// Speech synthesizer backed by Google Cloud Text-to-Speech
pub struct GoogleTextToSpeech {
    config: GoogleTtsConfig,
    client: reqwest::Client,
}

impl GoogleTextToSpeech {
    pub fn new(config: GoogleTtsConfig) -> Result<Self> {
        let client = google::client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!("{}/v1/text:synthesize", self.config.endpoint.trim_end_matches('/'))
    }

    fn build_request<'a>(&self, text: &'a str, voice: &'a VoiceConfig) -> SynthesizeRequest<'a> {
        SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelectionParams {
                language_code: voice.language.as_str(),
                ssml_gender: voice.gender.as_str(),
            },
            audio_config: AudioConfig {
                audio_encoding: self.config.audio_encoding.as_str(),
                speaking_rate: voice.speed,
            },
        }
    }

    fn decode(&self, response: SynthesizeResponse) -> Result<AudioClip> {
        let data = BASE64
            .decode(response.audio_content.as_bytes())
            .map_err(|e| Error::Tts(format!("Invalid audioContent: {}", e)))?;
        Ok(AudioClip::new(data, self.config.audio_encoding))
    }
}

#[async_trait]
impl TextToSpeech for GoogleTextToSpeech {
    async fn synthesize(&self, text: &str, config: &VoiceConfig) -> Result<AudioClip> {
        let body = self.build_request(text, config);

        let response = google::authorize(self.client.post(self.url()), self.config.auth.as_ref())
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Synthesis request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Tts(google::http_error(response).await));
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| Error::Tts(format!("Invalid synthesize response: {}", e)))?;

        let clip = self.decode(parsed)?;
        tracing::debug!(
            language = %config.language,
            text_chars = text.len(),
            audio_bytes = clip.len(),
            "Speech synthesized"
        );
        Ok(clip)
    }

    fn model_name(&self) -> &str {
        "google-tts-v1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patio_core::{LanguageTag, VoiceGender};

    fn tts() -> GoogleTextToSpeech {
        GoogleTextToSpeech::new(GoogleTtsConfig::default()).unwrap()
    }

    #[test]
    fn test_request_body() {
        let tts = tts();
        let voice = VoiceConfig::new(LanguageTag::parse("es-US").unwrap());
        let body = serde_json::to_value(tts.build_request("Hola", &voice)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "input": { "text": "Hola" },
                "voice": { "languageCode": "es-US", "ssmlGender": "NEUTRAL" },
                "audioConfig": { "audioEncoding": "MP3", "speakingRate": 1.0 }
            })
        );
    }

    #[test]
    fn test_voice_gender_passed_through() {
        let tts = tts();
        let voice = VoiceConfig::new(LanguageTag::parse("fr").unwrap()).with_gender(VoiceGender::Female);
        let body = serde_json::to_value(tts.build_request("Bonjour", &voice)).unwrap();
        assert_eq!(body["voice"]["ssmlGender"], "FEMALE");
    }

    #[test]
    fn test_decode_audio_content() {
        let tts = tts();
        let parsed: SynthesizeResponse = serde_json::from_str(r#"{"audioContent":"SUQz"}"#).unwrap();
        let clip = tts.decode(parsed).unwrap();
        assert_eq!(clip.data, b"ID3".to_vec());
        assert_eq!(clip.encoding, AudioEncoding::Mp3);

        let parsed: SynthesizeResponse = serde_json::from_str(r#"{"audioContent":"%%%"}"#).unwrap();
        assert!(matches!(tts.decode(parsed), Err(Error::Tts(_))));
    }

    #[test]
    fn test_url() {
        let tts = GoogleTextToSpeech::new(GoogleTtsConfig {
            endpoint: "http://localhost:8085/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(tts.url(), "http://localhost:8085/v1/text:synthesize");
    }
}

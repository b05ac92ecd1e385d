//! Chat Pipeline Orchestrator
//!
//! Runs the five stages strictly in order, each one awaiting a single
//! collaborator call:
//!
//! 1. Transcribe (audio input only)
//! 2. Translate into the pivot language
//! 3. Complete with the configured system prompt
//! 4. Translate the reply into the user's language
//! 5. Synthesize speech (when enabled)
//!
//! The first failing stage aborts the run. Nothing is retried and no partial
//! response is produced.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::Instrument;

use patio_config::{ConfigError, Settings};
use patio_core::{
    join_transcripts, LanguageModel, SpeechToText, TextToSpeech, Translator, VoiceConfig,
    VoiceGender,
};

use crate::metrics;
use crate::request::{ChatResponse, Utterance, ValidatedRequest};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Transcribe,
    TranslateToPivot,
    Complete,
    TranslateBack,
    Synthesize,
}

impl Stage {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Transcribe => "transcribe",
            Stage::TranslateToPivot => "translate_to_pivot",
            Stage::Complete => "complete",
            Stage::TranslateBack => "translate_back",
            Stage::Synthesize => "synthesize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage failure; carries the collaborator's error unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: patio_core::Error,
}

/// Per-stage latency of one run, in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub transcribe_ms: Option<u64>,
    pub translate_to_pivot_ms: u64,
    pub complete_ms: u64,
    pub translate_back_ms: u64,
    pub synthesize_ms: Option<u64>,
    pub total_ms: u64,
}

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct ChatPipelineConfig {
    /// System prompt handed to the completion engine on every request
    pub system_prompt: String,
    /// Run stage 5
    pub synthesize_audio: bool,
    /// Voice gender for stage 5
    pub voice_gender: VoiceGender,
    /// Speaking rate for stage 5
    pub speaking_rate: f32,
}

impl Default for ChatPipelineConfig {
    fn default() -> Self {
        Self {
            system_prompt: patio_config::constants::persona::DEFAULT_SYSTEM_PROMPT.to_string(),
            synthesize_audio: true,
            voice_gender: VoiceGender::Neutral,
            speaking_rate: 1.0,
        }
    }
}

impl ChatPipelineConfig {
    /// Build from application settings, resolving the system prompt
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            system_prompt: settings.pipeline.resolve_system_prompt()?,
            synthesize_audio: settings.pipeline.synthesize_audio,
            voice_gender: settings.tts.voice_gender,
            speaking_rate: settings.tts.speaking_rate,
        })
    }
}

/// The chat pipeline
///
/// Holds shared handles only; one instance serves all requests concurrently.
pub struct ChatPipeline {
    stt: Arc<dyn SpeechToText>,
    translator: Arc<dyn Translator>,
    llm: Arc<dyn LanguageModel>,
    tts: Arc<dyn TextToSpeech>,
    config: ChatPipelineConfig,
}

impl ChatPipeline {
    pub fn new(
        stt: Arc<dyn SpeechToText>,
        translator: Arc<dyn Translator>,
        llm: Arc<dyn LanguageModel>,
        tts: Arc<dyn TextToSpeech>,
        config: ChatPipelineConfig,
    ) -> Self {
        Self {
            stt,
            translator,
            llm,
            tts,
            config,
        }
    }

    pub fn config(&self) -> &ChatPipelineConfig {
        &self.config
    }

    /// Run the pipeline and return the response
    pub async fn process(&self, request: ValidatedRequest) -> Result<ChatResponse, PipelineError> {
        self.run(request).await.map(|(response, _)| response)
    }

    /// Run the pipeline and also return per-stage timings
    pub async fn run(
        &self,
        request: ValidatedRequest,
    ) -> Result<(ChatResponse, StageTimings), PipelineError> {
        let span = tracing::info_span!(
            "chat_pipeline",
            request_id = %uuid::Uuid::new_v4(),
            input = request.input.kind(),
            user_language = %request.user_language,
            target_language = %request.target_language,
        );

        async move {
            metrics::record_request(request.input.kind());
            let start = Instant::now();
            let result = self.execute(request, start).await;

            match &result {
                Ok((_, timings)) => tracing::info!(
                    total_ms = timings.total_ms,
                    "Chat pipeline completed"
                ),
                Err(e) => tracing::error!(
                    stage = %e.stage,
                    error = %e.source,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Chat pipeline failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        request: ValidatedRequest,
        start: Instant,
    ) -> Result<(ChatResponse, StageTimings), PipelineError> {
        let ValidatedRequest {
            input,
            user_language,
            target_language,
        } = request;
        let mut timings = StageTimings::default();

        // 1. Acquire text
        let working_text = match input {
            Utterance::Text(text) => text,
            Utterance::Audio(audio) => {
                let (results, ms) =
                    timed(Stage::Transcribe, self.stt.transcribe(&audio, &user_language)).await?;
                timings.transcribe_ms = Some(ms);
                if results.is_empty() {
                    tracing::debug!("Recognizer returned no speech");
                }
                join_transcripts(&results)
            }
        };

        // 2. Translate to pivot
        let (pivot_text, ms) = timed(
            Stage::TranslateToPivot,
            self.translator.translate(&working_text, &target_language),
        )
        .await?;
        timings.translate_to_pivot_ms = ms;

        // 3. Generate reply
        let (reply, ms) = timed(
            Stage::Complete,
            self.llm.complete(&self.config.system_prompt, &pivot_text),
        )
        .await?;
        timings.complete_ms = ms;

        // 4. Translate back
        let (text_response, ms) = timed(
            Stage::TranslateBack,
            self.translator.translate(&reply, &user_language),
        )
        .await?;
        timings.translate_back_ms = ms;

        // 5. Synthesize
        let audio_response = if self.config.synthesize_audio {
            let voice = VoiceConfig::new(user_language)
                .with_gender(self.config.voice_gender)
                .with_speed(self.config.speaking_rate);
            let (clip, ms) =
                timed(Stage::Synthesize, self.tts.synthesize(&text_response, &voice)).await?;
            timings.synthesize_ms = Some(ms);
            Some(BASE64.encode(&clip.data))
        } else {
            None
        };

        timings.total_ms = start.elapsed().as_millis() as u64;

        Ok((
            ChatResponse {
                text_response,
                audio_response,
            },
            timings,
        ))
    }
}

async fn timed<T, F>(stage: Stage, fut: F) -> Result<(T, u64), PipelineError>
where
    F: Future<Output = patio_core::Result<T>>,
{
    let start = Instant::now();
    let result = fut.await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    metrics::record_stage_latency(stage, elapsed_ms);

    match result {
        Ok(value) => {
            tracing::debug!(stage = %stage, elapsed_ms, "Stage complete");
            Ok((value, elapsed_ms))
        }
        Err(source) => {
            metrics::record_failure(stage);
            Err(PipelineError { stage, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::TranslateToPivot.to_string(), "translate_to_pivot");
        assert_eq!(Stage::Synthesize.as_str(), "synthesize");
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError {
            stage: Stage::Complete,
            source: patio_core::Error::Llm("HTTP 429: quota".to_string()),
        };
        assert_eq!(err.to_string(), "complete failed: Completion error: HTTP 429: quota");
    }

    #[test]
    fn test_config_from_settings() {
        let mut settings = Settings::default();
        settings.pipeline.synthesize_audio = false;
        settings.pipeline.system_prompt = Some("Alt persona".to_string());
        settings.tts.voice_gender = VoiceGender::Female;

        let config = ChatPipelineConfig::from_settings(&settings).unwrap();
        assert!(!config.synthesize_audio);
        assert_eq!(config.system_prompt, "Alt persona");
        assert_eq!(config.voice_gender, VoiceGender::Female);
    }
}

//! Chat pipeline for the Patio backend
//!
//! One request in, one response out:
//!
//! ```text
//! audio? ──STT──┐
//!               ├─> translate(pivot) ─> complete ─> translate(user) ─> TTS?
//! message ──────┘
//! ```
//!
//! - [`request`]: wire types and validation
//! - [`orchestrator`]: the stage sequence and its failure contract
//! - [`stt`], [`tts`]: Google Cloud speech adapters

pub mod metrics;
pub mod orchestrator;
pub mod request;
pub mod stt;
pub mod tts;

mod google;

pub use orchestrator::{ChatPipeline, ChatPipelineConfig, PipelineError, Stage, StageTimings};
pub use request::{
    AudioPayload, ChatRequest, ChatResponse, Utterance, ValidatedRequest, ValidationError,
};
pub use stt::{GoogleSpeechToText, GoogleSttConfig};
pub use tts::{GoogleTextToSpeech, GoogleTtsConfig};

//! Core traits and types for the Patio chat pipeline
//!
//! This crate provides foundational types used across all other crates:
//! - Collaborator traits for pluggable backends (STT, translation, LLM, TTS)
//! - Language tags
//! - Audio clip and voice types
//! - Error types

pub mod audio;
pub mod error;
pub mod language;
pub mod traits;
pub mod transcript;
pub mod voice_config;

pub use audio::{AudioClip, AudioEncoding};
pub use error::{Error, Result};
pub use language::{LanguageTag, LanguageTagError};
pub use transcript::{join_transcripts, TranscriptResult};
pub use voice_config::{VoiceConfig, VoiceGender};

// Trait re-exports
pub use traits::{LanguageModel, SpeechToText, TextToSpeech, Translator};

//! Core traits for the chat pipeline
//!
//! Every external capability the pipeline talks to sits behind one of these
//! traits, so that:
//! - backends can be swapped through configuration
//! - the orchestrator can be tested with recording mocks
//!
//! # Trait Hierarchy
//!
//! ```text
//! Speech Processing:
//!   - SpeechToText: Audio → Text transcription
//!   - TextToSpeech: Text → Audio synthesis
//!
//! Language Models:
//!   - LanguageModel: Single-turn constrained completion
//!
//! Text Processing:
//!   - Translator: Translate into a target language (source auto-detected)
//! ```

mod llm;
mod speech;
mod text_processing;

pub use llm::LanguageModel;
pub use speech::{SpeechToText, TextToSpeech};
pub use text_processing::Translator;

//! Text processing for the Patio chat pipeline
//!
//! This crate provides the translation collaborator:
//! - **Google**: Cloud Translation v2 over REST, source language auto-detected
//! - **Disabled**: pass-through for single-language deployments and tests
//!
//! # Example
//!
//! ```ignore
//! use patio_text_processing::{create_translator, TranslationConfig};
//!
//! let translator = create_translator(&TranslationConfig::default())?;
//! let english = translator.translate("¿Qué es un ITIN?", &"en".parse()?).await?;
//! ```

pub mod translation;

mod error;

pub use error::{Result, TextProcessingError};
pub use translation::{
    create_translator, GoogleTranslator, NoopTranslator, TranslationConfig, TranslationProvider,
};

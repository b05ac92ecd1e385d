//! Text-to-Speech adapters

mod google;

pub use google::{GoogleTextToSpeech, GoogleTtsConfig};

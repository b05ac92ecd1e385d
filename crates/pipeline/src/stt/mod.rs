//! Speech-to-Text adapters

mod google;

pub use google::{GoogleSpeechToText, GoogleSttConfig};

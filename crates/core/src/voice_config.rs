//! Voice configuration types for TTS

use serde::{Deserialize, Serialize};

use crate::language::LanguageTag;

/// Voice gender requested from the synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceGender {
    #[default]
    Neutral,
    Female,
    Male,
}

impl VoiceGender {
    /// SSML gender name used by the speech APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceGender::Neutral => "NEUTRAL",
            VoiceGender::Female => "FEMALE",
            VoiceGender::Male => "MALE",
        }
    }
}

/// Voice configuration for a single synthesis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Language to speak in
    pub language: LanguageTag,
    /// Requested voice gender
    #[serde(default)]
    pub gender: VoiceGender,
    /// Speech speed (0.25 - 4.0, default 1.0)
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    1.0
}

impl VoiceConfig {
    /// Create a new voice config with the given language and neutral defaults
    pub fn new(language: LanguageTag) -> Self {
        Self {
            language,
            gender: VoiceGender::Neutral,
            speed: default_speed(),
        }
    }

    /// Set the voice gender
    pub fn with_gender(mut self, gender: VoiceGender) -> Self {
        self.gender = gender;
        self
    }

    /// Set the speech speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.clamp(0.25, 4.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_defaults() {
        let voice = VoiceConfig::new(LanguageTag::parse("es-US").unwrap());
        assert_eq!(voice.gender, VoiceGender::Neutral);
        assert_eq!(voice.speed, 1.0);
        assert_eq!(voice.gender.as_str(), "NEUTRAL");
    }

    #[test]
    fn test_speed_clamped() {
        let voice = VoiceConfig::new(LanguageTag::parse("en").unwrap()).with_speed(9.0);
        assert_eq!(voice.speed, 4.0);
    }
}

//! Transcript types

use serde::{Deserialize, Serialize};

/// One recognized utterance
///
/// A recognizer returns one of these per result, each holding the best
/// alternative for that stretch of audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TranscriptResult {
    /// Transcribed text
    pub text: String,
    /// Recognizer confidence (0.0 - 1.0), when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl TranscriptResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }
}

/// Join utterance transcripts with line breaks, preserving recognizer order
///
/// No results yields an empty string.
pub fn join_transcripts(results: &[TranscriptResult]) -> String {
    results
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_preserves_order() {
        let results = vec![
            TranscriptResult::new("what is an ITIN"),
            TranscriptResult::new("and who needs one"),
        ];
        assert_eq!(join_transcripts(&results), "what is an ITIN\nand who needs one");
    }

    #[test]
    fn test_join_empty() {
        assert_eq!(join_transcripts(&[]), "");
        assert_eq!(join_transcripts(&[TranscriptResult::new("solo")]), "solo");
    }

    #[test]
    fn test_confidence_clamped() {
        let r = TranscriptResult::new("x").with_confidence(1.7);
        assert_eq!(r.confidence, Some(1.0));
    }
}

//! Speech processing traits

use crate::{AudioClip, LanguageTag, Result, TranscriptResult, VoiceConfig};
use async_trait::async_trait;

/// Speech-to-Text interface
///
/// Implementations:
/// - `GoogleSpeechToText` - Google Cloud Speech-to-Text v1 REST
///
/// # Example
///
/// ```ignore
/// let stt: Arc<dyn SpeechToText> = Arc::new(GoogleSpeechToText::new(config)?);
/// let results = stt.transcribe(&pcm, &LanguageTag::parse("es-US")?).await?;
/// let text = join_transcripts(&results);
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribe a complete recording
    ///
    /// # Arguments
    /// * `audio` - LINEAR16 PCM, 16 kHz, mono
    /// * `language` - Language the speaker is expected to use
    ///
    /// # Returns
    /// One result per recognized utterance, in recognizer order. An empty
    /// vector means no speech was recognized; that is not an error.
    async fn transcribe(&self, audio: &[u8], language: &LanguageTag)
        -> Result<Vec<TranscriptResult>>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

/// Text-to-Speech interface
///
/// Implementations:
/// - `GoogleTextToSpeech` - Google Cloud Text-to-Speech v1 REST
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Synthesize text to audio
    ///
    /// # Arguments
    /// * `text` - Text to speak
    /// * `config` - Voice configuration (language, gender, speed)
    ///
    /// # Returns
    /// Encoded clip in the synthesizer's configured container format
    async fn synthesize(&self, text: &str, config: &VoiceConfig) -> Result<AudioClip>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AudioEncoding, Error};

    struct MockStt {
        utterances: Vec<&'static str>,
    }

    #[async_trait]
    impl SpeechToText for MockStt {
        async fn transcribe(
            &self,
            audio: &[u8],
            _language: &LanguageTag,
        ) -> Result<Vec<TranscriptResult>> {
            if audio.is_empty() {
                return Err(Error::Stt("no audio".to_string()));
            }
            Ok(self.utterances.iter().map(|u| TranscriptResult::new(*u)).collect())
        }

        fn model_name(&self) -> &str {
            "mock-stt"
        }
    }

    struct MockTts;

    #[async_trait]
    impl TextToSpeech for MockTts {
        async fn synthesize(&self, text: &str, _config: &VoiceConfig) -> Result<AudioClip> {
            Ok(AudioClip::new(text.as_bytes().to_vec(), AudioEncoding::Mp3))
        }

        fn model_name(&self) -> &str {
            "mock-tts"
        }
    }

    #[tokio::test]
    async fn test_stt_object_safe() {
        let stt: Box<dyn SpeechToText> = Box::new(MockStt {
            utterances: vec!["hola", "que tal"],
        });
        let lang = LanguageTag::parse("es").unwrap();
        let results = stt.transcribe(&[0u8; 4], &lang).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].text, "que tal");
        assert!(stt.transcribe(&[], &lang).await.is_err());
        assert_eq!(stt.model_name(), "mock-stt");
    }

    #[tokio::test]
    async fn test_tts_object_safe() {
        let tts: Box<dyn TextToSpeech> = Box::new(MockTts);
        let voice = VoiceConfig::new(LanguageTag::parse("en-US").unwrap());
        let clip = tts.synthesize("hi", &voice).await.unwrap();
        assert_eq!(clip.data, b"hi".to_vec());
        assert_eq!(clip.encoding, AudioEncoding::Mp3);
    }
}

//! Audio clip types

use serde::{Deserialize, Serialize};

/// Audio encodings understood by the speech collaborators
///
/// Names follow the Google Cloud speech APIs so that configuration values can
/// be passed straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// 16-bit signed little-endian PCM
    Linear16,
    /// MPEG layer III
    #[default]
    Mp3,
    /// Opus in an Ogg container
    OggOpus,
    /// 8-bit mu-law (telephony)
    Mulaw,
}

impl AudioEncoding {
    /// Wire name used by the speech APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Linear16 => "LINEAR16",
            AudioEncoding::Mp3 => "MP3",
            AudioEncoding::OggOpus => "OGG_OPUS",
            AudioEncoding::Mulaw => "MULAW",
        }
    }

    /// MIME type of a clip in this encoding
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioEncoding::Linear16 => "audio/l16",
            AudioEncoding::Mp3 => "audio/mpeg",
            AudioEncoding::OggOpus => "audio/ogg",
            AudioEncoding::Mulaw => "audio/basic",
        }
    }
}

/// Encoded audio produced by a synthesizer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioClip {
    /// Encoded bytes (container format given by `encoding`)
    pub data: Vec<u8>,
    /// Encoding of `data`
    pub encoding: AudioEncoding,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, encoding: AudioEncoding) -> Self {
        Self { data, encoding }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

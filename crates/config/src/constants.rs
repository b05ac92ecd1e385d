//! Centralized constants for the Patio backend
//!
//! Endpoints, audio defaults and the built-in assistant persona live here so
//! that settings defaults and adapters agree on a single value.

/// Default persona and fixed phrases the completion engine is asked to use
pub mod persona {
    /// Refusal returned for questions outside the supported domain
    pub const REFUSAL: &str = "I can only answer questions related to Social Security Numbers, ITIN, or New York City Local Law 30. Please ask a question in this domain.";

    /// Phrase every reply ends with
    pub const CLOSING_PHRASE: &str = "How can Pat.io assist you further?";

    /// Built-in system prompt, used when neither `pipeline.system_prompt` nor
    /// `pipeline.prompt_file` is configured
    pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Pat.io, a helpful and friendly AI assistant. \
You answer questions about Social Security Numbers (SSN), Individual Taxpayer Identification Numbers (ITIN), \
and New York City Local Law 30 (language access for city services). \
Keep answers accurate, short and easy to understand. \
If a question is outside this domain, reply exactly with: \
'I can only answer questions related to Social Security Numbers, ITIN, or New York City Local Law 30. Please ask a question in this domain.' \
Always end your reply with 'How can Pat.io assist you further?' \
Remove all '*' characters from the response.";
}

/// Service endpoints
pub mod endpoints {
    /// Google Cloud Speech-to-Text REST base
    pub const GOOGLE_SPEECH: &str = "https://speech.googleapis.com";

    /// Google Cloud Translation REST base
    pub const GOOGLE_TRANSLATE: &str = "https://translation.googleapis.com";

    /// Google Cloud Text-to-Speech REST base
    pub const GOOGLE_TTS: &str = "https://texttospeech.googleapis.com";

    /// OpenAI-compatible API base
    pub const OPENAI: &str = "https://api.openai.com/v1";
}

/// Audio defaults for recognition input
pub mod audio {
    /// Recognizer input sample rate (Hz)
    pub const SAMPLE_RATE_HZ: u32 = 16_000;
}

/// LLM defaults
pub mod llm {
    pub const MODEL: &str = "gpt-4o-mini";
    pub const TEMPERATURE: f32 = 0.7;
    pub const MAX_TOKENS: u32 = 512;
    pub const TIMEOUT_SECS: u64 = 30;
}

/// Environment variables consulted when settings leave credentials empty
pub mod env_vars {
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    pub const GOOGLE_ACCESS_TOKEN: &str = "GOOGLE_ACCESS_TOKEN";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_carries_fixed_phrases() {
        assert!(persona::DEFAULT_SYSTEM_PROMPT.contains(persona::REFUSAL));
        assert!(persona::DEFAULT_SYSTEM_PROMPT.contains(persona::CLOSING_PHRASE));
        assert!(!persona::REFUSAL.contains('*'));
    }
}

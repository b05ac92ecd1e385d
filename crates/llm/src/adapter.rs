//! Language Model adapter
//!
//! Bridges the LlmBackend trait to the core LanguageModel trait,
//! allowing LLM backends to be used where LanguageModel is expected.

use async_trait::async_trait;
use std::sync::Arc;

use patio_core::{LanguageModel, Result};

use crate::backend::{FinishReason, LlmBackend};
use crate::prompt::single_turn;

/// Adapter that wraps an LlmBackend to implement the core LanguageModel trait.
///
/// Replies are sanitized before they leave the adapter: every `*` is removed
/// when `strip_asterisks` is set, whatever the prompt asked the model to do.
///
/// # Example
///
/// ```ignore
/// let backend = OpenAIBackend::new(OpenAIConfig::openai(key, "gpt-4o-mini"))?;
/// let language_model: Arc<dyn LanguageModel> = Arc::new(LanguageModelAdapter::new(backend));
/// ```
pub struct LanguageModelAdapter {
    backend: Arc<dyn LlmBackend>,
    model_name: String,
    strip_asterisks: bool,
}

impl LanguageModelAdapter {
    /// Create a new adapter wrapping an LlmBackend
    pub fn new<B: LlmBackend + 'static>(backend: B) -> Self {
        Self::from_arc(Arc::new(backend))
    }

    /// Create from an Arc'd backend
    pub fn from_arc(backend: Arc<dyn LlmBackend>) -> Self {
        let model_name = backend.model_name().to_string();
        Self {
            backend,
            model_name,
            strip_asterisks: true,
        }
    }

    /// Enable or disable asterisk removal
    pub fn with_strip_asterisks(mut self, enabled: bool) -> Self {
        self.strip_asterisks = enabled;
        self
    }

    fn sanitize(&self, text: String) -> String {
        if self.strip_asterisks && text.contains('*') {
            text.replace('*', "")
        } else {
            text
        }
    }
}

#[async_trait]
impl LanguageModel for LanguageModelAdapter {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String> {
        let messages = single_turn(system_prompt, user_text);
        let result = self.backend.generate(&messages).await?;

        if result.finish_reason == FinishReason::Length {
            tracing::warn!(model = %self.model_name, "Completion truncated at max_tokens");
        }

        Ok(self.sanitize(result.text))
    }

    async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GenerationResult;
    use crate::prompt::{Message, Role};
    use crate::LlmError;
    use std::sync::Mutex;

    // Mock backend for testing
    struct MockBackend {
        response: std::result::Result<String, String>,
        seen: Mutex<Vec<Message>>,
    }

    impl MockBackend {
        fn new(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmBackend for MockBackend {
        async fn generate(
            &self,
            messages: &[Message],
        ) -> std::result::Result<GenerationResult, LlmError> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            match &self.response {
                Ok(text) => Ok(GenerationResult {
                    text: text.clone(),
                    tokens: 10,
                    total_time_ms: 100,
                    finish_reason: FinishReason::Stop,
                }),
                Err(msg) => Err(LlmError::Api(msg.clone())),
            }
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "mock-model"
        }
    }

    #[tokio::test]
    async fn test_adapter_sends_single_turn() {
        let backend = Arc::new(MockBackend::new("Hello, world!"));
        let adapter = LanguageModelAdapter::from_arc(backend.clone());

        let reply = adapter.complete("You are helpful", "Hi").await.unwrap();
        assert_eq!(reply, "Hello, world!");

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[0].content, "You are helpful");
        assert_eq!(seen[1].role, Role::User);
        assert_eq!(seen[1].content, "Hi");
    }

    #[tokio::test]
    async fn test_adapter_strips_asterisks() {
        let adapter = LanguageModelAdapter::new(MockBackend::new("**ITIN** stands for *Individual* Taxpayer ID"));
        let reply = adapter.complete("p", "q").await.unwrap();
        assert_eq!(reply, "ITIN stands for Individual Taxpayer ID");

        let adapter = LanguageModelAdapter::new(MockBackend::new("*kept*")).with_strip_asterisks(false);
        assert_eq!(adapter.complete("p", "q").await.unwrap(), "*kept*");
    }

    #[tokio::test]
    async fn test_adapter_maps_errors() {
        let adapter = LanguageModelAdapter::new(MockBackend::failing("HTTP 429 Too Many Requests: quota"));
        let err = adapter.complete("p", "q").await.unwrap_err();
        assert_eq!(
            err,
            patio_core::Error::Llm("HTTP 429 Too Many Requests: quota".to_string())
        );
    }

    #[tokio::test]
    async fn test_adapter_is_available() {
        let adapter = LanguageModelAdapter::new(MockBackend::new("test"));
        assert!(adapter.is_available().await);
        assert_eq!(adapter.model_name(), "mock-model");
    }
}

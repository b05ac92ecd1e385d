//! Language model trait

use crate::Result;
use async_trait::async_trait;

/// Completion interface used by the pipeline
///
/// One system prompt, one user turn, no history. Implementations return the
/// assistant's reply text; the pipeline forwards it without inspection.
///
/// Implementations:
/// - `LanguageModelAdapter` - wraps any `LlmBackend` (OpenAI-compatible API)
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Produce a reply to `user_text` under `system_prompt`
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String>;

    /// Check if the model is reachable
    async fn is_available(&self) -> bool {
        true
    }

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

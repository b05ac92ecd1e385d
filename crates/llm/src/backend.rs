//! LLM backend implementations

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::prompt::Message;
use crate::LlmError;

/// LLM generation result
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated text
    pub text: String,
    /// Tokens generated (0 when the backend does not report usage)
    pub tokens: usize,
    /// Total generation time (ms)
    pub total_time_ms: u64,
    /// Finish reason
    pub finish_reason: FinishReason,
}

/// Finish reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
}

impl FinishReason {
    fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        }
    }
}

/// LLM Backend trait
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a response
    async fn generate(&self, messages: &[Message]) -> Result<GenerationResult, LlmError>;

    /// Check if model is available
    async fn is_available(&self) -> bool;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Configuration for OpenAI-compatible backends
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API endpoint (OpenAI: https://api.openai.com/v1)
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature (0-2)
    pub temperature: f32,
    /// Request timeout
    pub timeout: Duration,
    /// Organization ID (OpenAI specific)
    pub organization: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        use patio_config::constants::{endpoints, llm};

        Self {
            endpoint: endpoints::OPENAI.to_string(),
            api_key: String::new(),
            model: llm::MODEL.to_string(),
            max_tokens: llm::MAX_TOKENS,
            temperature: llm::TEMPERATURE,
            timeout: Duration::from_secs(llm::TIMEOUT_SECS),
            organization: None,
        }
    }
}

impl OpenAIConfig {
    /// Create config for OpenAI
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    /// Create config for local OpenAI-compatible server (vLLM, Ollama, etc.)
    pub fn local(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: String::new(),
            model: model.into(),
            ..Default::default()
        }
    }

    /// Build from application settings
    pub fn from_settings(llm: &patio_config::LlmConfig) -> Self {
        Self {
            endpoint: llm.endpoint.clone(),
            api_key: llm.resolved_api_key().unwrap_or_default(),
            model: llm.model.clone(),
            max_tokens: llm.max_tokens,
            temperature: llm.temperature,
            timeout: Duration::from_secs(llm.timeout_secs),
            organization: None,
        }
    }

    fn is_local(&self) -> bool {
        self.endpoint.starts_with("http://localhost") || self.endpoint.starts_with("http://127.0.0.1")
    }
}

/// OpenAI-compatible backend
///
/// Works with:
/// - OpenAI
/// - vLLM
/// - Local servers with OpenAI-compatible APIs
pub struct OpenAIBackend {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIBackend {
    /// Create new OpenAI backend
    pub fn new(config: OpenAIConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() && !config.is_local() {
            return Err(LlmError::Configuration(
                "API key required for remote endpoints".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the full API URL for chat completions
    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    fn build_request(&self, messages: &[Message]) -> OpenAIChatRequest {
        OpenAIChatRequest {
            model: self.config.model.clone(),
            messages: messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            stream: Some(false),
        }
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = if self.config.api_key.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.config.api_key)
        };

        match &self.config.organization {
            Some(org) => builder.header("OpenAI-Organization", org),
            None => builder,
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAIBackend {
    async fn generate(&self, messages: &[Message]) -> Result<GenerationResult, LlmError> {
        let start = Instant::now();
        let request = self.build_request(messages);

        let response = self
            .authorize(self.client.post(self.chat_url()))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let result = into_generation_result(response, start.elapsed().as_millis() as u64)?;
        tracing::debug!(
            model = %self.config.model,
            tokens = result.tokens,
            total_time_ms = result.total_time_ms,
            "Completion finished"
        );
        Ok(result)
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.config.endpoint.trim_end_matches('/'));
        self.authorize(self.client.get(&url))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

fn into_generation_result(
    response: OpenAIChatResponse,
    total_time_ms: u64,
) -> Result<GenerationResult, LlmError> {
    let tokens = response.usage.map(|u| u.completion_tokens).unwrap_or(0);
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

    Ok(GenerationResult {
        text: choice.message.content.unwrap_or_default(),
        tokens,
        total_time_ms,
        finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
    })
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    // null when the model refuses via a structured refusal
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    completion_tokens: usize,
}

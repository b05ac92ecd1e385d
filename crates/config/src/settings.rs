//! Main settings module

use config::{Config, Environment, File};
use patio_core::{AudioEncoding, VoiceGender};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{audio, endpoints, env_vars, llm, persona};
use crate::{ConfigError, PromptsConfig};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - missing credentials only produce warnings
    #[default]
    Development,
    /// Staging mode
    Staging,
    /// Production mode - credentials are required
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Google Cloud credentials shared by speech, translation and TTS
    #[serde(default)]
    pub google: GoogleConfig,

    /// Speech recognition
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Translation
    #[serde(default)]
    pub translation: TranslationSettings,

    /// Speech synthesis
    #[serde(default)]
    pub tts: TtsConfig,

    /// Completion engine
    #[serde(default)]
    pub llm: LlmConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_pipeline()?;
        self.validate_speech()?;
        self.validate_translation()?;
        self.validate_llm()?;

        if self.environment.is_production() {
            if self.google.auth().is_none() {
                return Err(ConfigError::MissingField(
                    "google.api_key or google.access_token".to_string(),
                ));
            }
            if self.llm.resolved_api_key().is_none() {
                return Err(ConfigError::MissingField("llm.api_key".to_string()));
            }
        }

        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        // Audio arrives base64-encoded, so anything under 1 KiB is unusable
        if self.server.max_body_bytes < 1024 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_body_bytes".to_string(),
                message: format!("Must be at least 1024, got {}", self.server.max_body_bytes),
            });
        }

        Ok(())
    }

    fn validate_pipeline(&self) -> Result<(), ConfigError> {
        if let Some(prompt) = &self.pipeline.system_prompt {
            if prompt.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "pipeline.system_prompt".to_string(),
                    message: "System prompt cannot be blank".to_string(),
                });
            }
        }

        if let Some(path) = &self.pipeline.prompt_file {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "pipeline.prompt_file".to_string(),
                    message: "Prompt file path cannot be blank".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        if !(8_000..=48_000).contains(&self.speech.sample_rate_hz) {
            return Err(ConfigError::InvalidValue {
                field: "speech.sample_rate_hz".to_string(),
                message: format!(
                    "Must be between 8000 and 48000, got {}",
                    self.speech.sample_rate_hz
                ),
            });
        }

        if !(0.25..=4.0).contains(&self.tts.speaking_rate) {
            return Err(ConfigError::InvalidValue {
                field: "tts.speaking_rate".to_string(),
                message: format!("Must be between 0.25 and 4.0, got {}", self.tts.speaking_rate),
            });
        }

        Ok(())
    }

    fn validate_translation(&self) -> Result<(), ConfigError> {
        match self.translation.provider.as_str() {
            "google" | "disabled" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                field: "translation.provider".to_string(),
                message: format!("Unknown provider '{}', expected 'google' or 'disabled'", other),
            }),
        }
    }

    fn validate_llm(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", self.llm.temperature),
            });
        }

        if self.llm.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_tokens".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_secs".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::MissingField("llm.model".to_string()));
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS restrictions (false = any origin)
    #[serde(default)]
    pub cors_enabled: bool,

    /// Allowed CORS origins (empty = localhost:3000 only)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_max_body_bytes() -> usize {
    // ~45 s of 16 kHz LINEAR16 after base64 expansion
    2 * 1024 * 1024
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: false,
            cors_origins: Vec::new(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Chat pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Run the speech synthesis stage
    #[serde(default = "default_true")]
    pub synthesize_audio: bool,

    /// Inline system prompt (takes precedence over `prompt_file`)
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a YAML prompt file (`system_prompt: ...`)
    #[serde(default)]
    pub prompt_file: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            synthesize_audio: true,
            system_prompt: None,
            prompt_file: None,
        }
    }
}

impl PipelineConfig {
    /// Resolve the system prompt
    ///
    /// Priority: inline `system_prompt`, then `prompt_file`, then the
    /// built-in persona.
    pub fn resolve_system_prompt(&self) -> Result<String, ConfigError> {
        if let Some(prompt) = self.system_prompt.as_deref() {
            if !prompt.trim().is_empty() {
                return Ok(prompt.to_string());
            }
        }

        if let Some(path) = self.prompt_file.as_deref() {
            let prompts = PromptsConfig::load(Path::new(path))?;
            tracing::debug!(path = %path, "Loaded system prompt from file");
            return Ok(prompts.system_prompt);
        }

        Ok(persona::DEFAULT_SYSTEM_PROMPT.to_string())
    }
}

/// Google Cloud authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleAuth {
    /// API key sent as the `key` query parameter
    ApiKey(String),
    /// OAuth2 access token sent as a bearer token
    BearerToken(String),
}

impl GoogleAuth {
    /// Query parameter to append to every request URL
    pub fn query_param(&self) -> Option<(&'static str, &str)> {
        match self {
            GoogleAuth::ApiKey(key) => Some(("key", key.as_str())),
            GoogleAuth::BearerToken(_) => None,
        }
    }

    /// Token for the `Authorization: Bearer` header
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            GoogleAuth::ApiKey(_) => None,
            GoogleAuth::BearerToken(token) => Some(token.as_str()),
        }
    }
}

/// Google Cloud credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoogleConfig {
    /// API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// OAuth2 access token (e.g. from `gcloud auth print-access-token`)
    #[serde(default)]
    pub access_token: Option<String>,
}

impl GoogleConfig {
    /// Resolve credentials from settings, then from the process environment
    pub fn auth(&self) -> Option<GoogleAuth> {
        self.auth_with(|name| std::env::var(name).ok())
    }

    fn auth_with<F>(&self, lookup: F) -> Option<GoogleAuth>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        if let Some(key) = non_empty(self.api_key.clone()) {
            return Some(GoogleAuth::ApiKey(key));
        }
        if let Some(token) = non_empty(self.access_token.clone()) {
            return Some(GoogleAuth::BearerToken(token));
        }
        if let Some(key) = non_empty(lookup(env_vars::GOOGLE_API_KEY)) {
            return Some(GoogleAuth::ApiKey(key));
        }
        non_empty(lookup(env_vars::GOOGLE_ACCESS_TOKEN)).map(GoogleAuth::BearerToken)
    }
}

/// Speech recognition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// REST base URL
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// Input audio encoding
    #[serde(default = "default_speech_encoding")]
    pub encoding: AudioEncoding,

    /// Input sample rate
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: u32,

    /// Recognition model (provider default when unset)
    #[serde(default)]
    pub model: Option<String>,

    /// Request timeout
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

fn default_speech_endpoint() -> String {
    endpoints::GOOGLE_SPEECH.to_string()
}
fn default_speech_encoding() -> AudioEncoding {
    AudioEncoding::Linear16
}
fn default_sample_rate() -> u32 {
    audio::SAMPLE_RATE_HZ
}
fn default_service_timeout() -> u64 {
    30
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: default_speech_endpoint(),
            encoding: default_speech_encoding(),
            sample_rate_hz: default_sample_rate(),
            model: None,
            timeout_secs: default_service_timeout(),
        }
    }
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSettings {
    /// Provider: `google` or `disabled`
    #[serde(default = "default_translation_provider")]
    pub provider: String,

    /// REST base URL
    #[serde(default = "default_translate_endpoint")]
    pub endpoint: String,

    /// Request timeout
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

fn default_translation_provider() -> String {
    "google".to_string()
}
fn default_translate_endpoint() -> String {
    endpoints::GOOGLE_TRANSLATE.to_string()
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            provider: default_translation_provider(),
            endpoint: default_translate_endpoint(),
            timeout_secs: default_service_timeout(),
        }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// REST base URL
    #[serde(default = "default_tts_endpoint")]
    pub endpoint: String,

    /// Voice gender
    #[serde(default)]
    pub voice_gender: VoiceGender,

    /// Output container format
    #[serde(default)]
    pub audio_encoding: AudioEncoding,

    /// Speaking rate
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f32,

    /// Request timeout
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_endpoint() -> String {
    endpoints::GOOGLE_TTS.to_string()
}
fn default_speaking_rate() -> f32 {
    1.0
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_tts_endpoint(),
            voice_gender: VoiceGender::Neutral,
            audio_encoding: AudioEncoding::Mp3,
            speaking_rate: default_speaking_rate(),
            timeout_secs: default_service_timeout(),
        }
    }
}

/// Completion engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// API key (falls back to OPENAI_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum reply tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// Remove `*` characters from replies
    #[serde(default = "default_true")]
    pub strip_asterisks: bool,
}

fn default_llm_endpoint() -> String {
    endpoints::OPENAI.to_string()
}
fn default_llm_model() -> String {
    llm::MODEL.to_string()
}
fn default_temperature() -> f32 {
    llm::TEMPERATURE
}
fn default_max_tokens() -> u32 {
    llm::MAX_TOKENS
}
fn default_llm_timeout() -> u64 {
    llm::TIMEOUT_SECS
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            api_key: None,
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout(),
            strip_asterisks: true,
        }
    }
}

impl LlmConfig {
    /// API key from settings, else from OPENAI_API_KEY
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(env_vars::OPENAI_API_KEY).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Install the Prometheus recorder and serve /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (PATIO__ prefix, e.g. `PATIO__SERVER__PORT`)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Same as [`load_settings`] with an explicit config directory
pub fn load_settings_from(dir: impl AsRef<Path>, env: Option<&str>) -> Result<Settings, ConfigError> {
    let dir = dir.as_ref();
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::from(dir.join("default")).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("PATIO")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert!(settings.pipeline.synthesize_audio);
        assert_eq!(settings.speech.encoding, AudioEncoding::Linear16);
        assert_eq!(settings.speech.sample_rate_hz, 16_000);
        assert_eq!(settings.tts.audio_encoding, AudioEncoding::Mp3);
        assert_eq!(settings.tts.voice_gender, VoiceGender::Neutral);
        assert!(settings.llm.strip_asterisks);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();

        // Port cannot be 0
        settings.server.port = 0;
        assert!(settings.validate_server().is_err());
        settings.server.port = 8080;

        settings.server.max_body_bytes = 10;
        assert!(settings.validate_server().is_err());
        settings.server.max_body_bytes = 1024;

        assert!(settings.validate_server().is_ok());
    }

    #[test]
    fn test_llm_validation() {
        let mut settings = Settings::default();

        settings.llm.temperature = 2.5;
        assert!(settings.validate_llm().is_err());
        settings.llm.temperature = 0.0;
        assert!(settings.validate_llm().is_ok());

        settings.llm.max_tokens = 0;
        assert!(settings.validate_llm().is_err());
        settings.llm.max_tokens = 64;

        settings.llm.model = " ".to_string();
        assert!(settings.validate_llm().is_err());
    }

    #[test]
    fn test_translation_provider_validation() {
        let mut settings = Settings::default();
        settings.translation.provider = "disabled".to_string();
        assert!(settings.validate_translation().is_ok());

        settings.translation.provider = "indictrans".to_string();
        assert!(matches!(
            settings.validate_translation(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_blank_prompt_rejected() {
        let mut settings = Settings::default();
        settings.pipeline.system_prompt = Some("   ".to_string());
        assert!(settings.validate_pipeline().is_err());
    }

    #[test]
    fn test_resolve_system_prompt_priority() {
        let mut pipeline = PipelineConfig::default();
        assert_eq!(
            pipeline.resolve_system_prompt().unwrap(),
            persona::DEFAULT_SYSTEM_PROMPT
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"system_prompt: From file\n").unwrap();
        pipeline.prompt_file = Some(file.path().display().to_string());
        assert_eq!(pipeline.resolve_system_prompt().unwrap(), "From file");

        pipeline.system_prompt = Some("Inline".to_string());
        assert_eq!(pipeline.resolve_system_prompt().unwrap(), "Inline");
    }

    #[test]
    fn test_missing_prompt_file_is_error() {
        let pipeline = PipelineConfig {
            prompt_file: Some("/no/such/prompts.yaml".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            pipeline.resolve_system_prompt(),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_google_auth_resolution() {
        let none = |_: &str| None;
        let google = GoogleConfig::default();
        assert_eq!(google.auth_with(none), None);

        let from_env = |name: &str| {
            (name == env_vars::GOOGLE_ACCESS_TOKEN).then(|| "ya29.token".to_string())
        };
        assert_eq!(
            google.auth_with(from_env),
            Some(GoogleAuth::BearerToken("ya29.token".to_string()))
        );

        let google = GoogleConfig {
            api_key: Some("AIza-key".to_string()),
            access_token: Some("ya29.other".to_string()),
        };
        assert_eq!(
            google.auth_with(from_env),
            Some(GoogleAuth::ApiKey("AIza-key".to_string()))
        );

        let google = GoogleConfig {
            api_key: Some(String::new()),
            access_token: Some("ya29.other".to_string()),
        };
        assert_eq!(
            google.auth_with(none),
            Some(GoogleAuth::BearerToken("ya29.other".to_string()))
        );
    }

    #[test]
    fn test_load_layers_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9000\npipeline:\n  synthesize_audio: false\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.yaml"),
            "environment: staging\nserver:\n  port: 9100\nllm:\n  model: gpt-4o\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert!(!settings.pipeline.synthesize_audio);

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.llm.model, "gpt-4o");
        assert!(!settings.pipeline.synthesize_audio);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.yaml"), "llm:\n  temperature: 9.0\n").unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), None),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_production_requires_credentials() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("production.yaml"),
            "environment: production\ngoogle:\n  api_key: AIza-test\nllm:\n  api_key: sk-test\n",
        )
        .unwrap();
        let settings = load_settings_from(dir.path(), Some("production")).unwrap();
        assert!(settings.environment.is_production());

        // Credentials may also come from the process environment
        if std::env::var(env_vars::GOOGLE_API_KEY).is_ok()
            || std::env::var(env_vars::GOOGLE_ACCESS_TOKEN).is_ok()
        {
            return;
        }
        std::fs::write(dir.path().join("production.yaml"), "environment: production\n").unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), Some("production")),
            Err(ConfigError::MissingField(_))
        ));
    }
}

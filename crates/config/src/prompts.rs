//! Prompt file loading
//!
//! A prompt file is a small YAML document:
//!
//! ```yaml
//! system_prompt: |
//!   You are Pat.io, ...
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Prompt configuration loaded from a YAML file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromptsConfig {
    /// System prompt handed to the completion engine
    #[serde(default)]
    pub system_prompt: String,
}

impl PromptsConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileNotFound(format!("{}: {}", path.display(), e))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: PromptsConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config.system_prompt.trim().is_empty() {
            return Err(ConfigError::MissingField("system_prompt".to_string()));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_yaml() {
        let yaml = "system_prompt: |\n  You are a test persona.\n  Never use asterisks.\n";
        let config = PromptsConfig::from_yaml(yaml).unwrap();
        assert!(config.system_prompt.starts_with("You are a test persona."));
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let err = PromptsConfig::from_yaml("system_prompt: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "system_prompt: Alternate persona").unwrap();

        let config = PromptsConfig::load(file.path()).unwrap();
        assert_eq!(config.system_prompt, "Alternate persona");
    }

    #[test]
    fn test_missing_file() {
        let err = PromptsConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}

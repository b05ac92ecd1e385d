//! Pass-through translator

use async_trait::async_trait;
use patio_core::{LanguageTag, Result, Translator};

/// Returns its input unchanged
#[derive(Debug, Clone, Default)]
pub struct NoopTranslator;

impl NoopTranslator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _target: &LanguageTag) -> Result<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough() {
        let translator = NoopTranslator::new();
        let target = LanguageTag::parse("es").unwrap();
        assert_eq!(translator.translate("Hello", &target).await.unwrap(), "Hello");
        assert_eq!(translator.translate("", &target).await.unwrap(), "");
    }
}

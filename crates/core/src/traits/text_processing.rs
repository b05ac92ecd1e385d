//! Text processing traits

use crate::{LanguageTag, Result};
use async_trait::async_trait;

/// Translation interface
///
/// Implementations:
/// - `GoogleTranslator` - Google Cloud Translation v2 REST
/// - `NoopTranslator` - pass-through, for deployments without translation
///
/// The source language is always auto-detected by the implementation.
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate text into `target`
    ///
    /// Empty input is legal and must yield empty output rather than an error.
    async fn translate(&self, text: &str, target: &LanguageTag) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperTranslator;

    #[async_trait]
    impl Translator for UpperTranslator {
        async fn translate(&self, text: &str, _target: &LanguageTag) -> Result<String> {
            Ok(text.to_uppercase())
        }

        fn name(&self) -> &str {
            "upper"
        }
    }

    #[tokio::test]
    async fn test_translator_empty_input() {
        let translator: std::sync::Arc<dyn Translator> = std::sync::Arc::new(UpperTranslator);
        let target = LanguageTag::parse("en").unwrap();
        assert_eq!(translator.translate("", &target).await.unwrap(), "");
        assert_eq!(translator.translate("abc", &target).await.unwrap(), "ABC");
    }
}

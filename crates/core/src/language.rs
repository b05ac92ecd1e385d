//! Language tags
//!
//! Requests carry BCP-47 style tags (`en-US`, `es`, `zh-TW`). The pipeline
//! never interprets them beyond a shape check; each collaborator hands the tag
//! to its backend as-is, which keeps "same language" policy out of the core.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("valid language tag pattern")
});

/// Errors produced when parsing a language tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageTagError {
    #[error("language tag is empty")]
    Empty,

    #[error("'{0}' is not a valid language tag")]
    Malformed(String),
}

/// A validated BCP-47 shaped language tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse and validate a tag, trimming surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self, LanguageTagError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LanguageTagError::Empty);
        }
        if !TAG_PATTERN.is_match(trimmed) {
            return Err(LanguageTagError::Malformed(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The tag exactly as supplied (minus surrounding whitespace)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageTag {
    type Err = LanguageTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = LanguageTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub mod prefixes;
pub mod rules;

pub use rules::RuleSegmenter;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScoreError;

/// Language tag used to pick segmentation rules.
///
/// Tags are normalized to the lowercase primary subtag, so `en`, `EN`,
/// `en-US` and `en_GB` all refer to the same language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub fn parse(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        Language(primary)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Language("en".to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Language::parse(s))
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Language::parse(&s)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0
    }
}

/// Splits text into sentences for a given language.
///
/// Implementations must be deterministic: the same text and language always
/// yield the same sentences. Scoring arithmetic only depends on this trait,
/// so another backend can be swapped in without touching the engine.
pub trait SentenceSegmenter: Send + Sync {
    /// Split `text` into sentences.
    ///
    /// Returns `ScoreError::UnsupportedLanguage` when `language` has no rules.
    /// Empty or whitespace-only text yields an empty list.
    fn segment(&self, text: &str, language: &Language) -> Result<Vec<String>, ScoreError>;

    fn supports(&self, language: &Language) -> bool;
}

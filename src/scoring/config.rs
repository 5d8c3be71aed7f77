use serde::{Deserialize, Serialize};

use crate::segment::Language;

pub const DEFAULT_NORMALIZING_FACTOR: f64 = 50.0;
pub const DEFAULT_PRIORITY: i64 = 3;
pub const DEFAULT_LANGUAGE: &str = "en";

/// How the priority-weighted score is turned into the final integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Round half away from zero (7.5 -> 8)
    #[default]
    Nearest,
    /// Drop the fractional part (7.5 -> 7)
    Truncate,
}

impl RoundingMode {
    pub fn apply(&self, value: f64) -> u64 {
        let rounded = match self {
            RoundingMode::Nearest => value.round(),
            RoundingMode::Truncate => value.trunc(),
        };
        rounded.max(0.0) as u64
    }
}

/// Scoring configuration.
///
/// Every field is optional; missing fields fall back to the defaults used
/// by the task workflow (factor 50, English, priority 3, nearest rounding).
///
/// Example YAML:
/// ```yaml
/// scoring:
///   normalizing_factor: 50
///   language: en
///   priority: 3
///   rounding: nearest
///   strict_priority: false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Blends the LIX toward a fixed baseline: ((lix + factor) / 2)
    #[serde(default)]
    pub normalizing_factor: Option<f64>,

    /// Language used for sentence segmentation when none is given
    #[serde(default)]
    pub language: Option<String>,

    /// Priority used when none is given (1..=5)
    #[serde(default)]
    pub priority: Option<i64>,

    #[serde(default)]
    pub rounding: Option<RoundingMode>,

    /// Reject priorities outside 1..=5 instead of ignoring them
    #[serde(default)]
    pub strict_priority: Option<bool>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            normalizing_factor: Some(DEFAULT_NORMALIZING_FACTOR),
            language: Some(DEFAULT_LANGUAGE.to_string()),
            priority: Some(DEFAULT_PRIORITY),
            rounding: Some(RoundingMode::Nearest),
            strict_priority: Some(false),
        }
    }
}

impl ScoringConfig {
    pub fn normalizing_factor(&self) -> f64 {
        self.normalizing_factor.unwrap_or(DEFAULT_NORMALIZING_FACTOR)
    }

    pub fn language(&self) -> Language {
        self.language
            .as_deref()
            .map(Language::parse)
            .unwrap_or_default()
    }

    pub fn priority(&self) -> i64 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding.unwrap_or_default()
    }

    pub fn strict_priority(&self) -> bool {
        self.strict_priority.unwrap_or(false)
    }
}

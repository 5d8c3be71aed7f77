use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Default record file used by `batch` and `rescore`
    #[serde(default)]
    pub records: Option<String>,
}

impl Config {
    /// Scoring config with defaults filled in for anything left unset.
    pub fn effective_scoring(&self) -> ScoringConfig {
        let defaults = ScoringConfig::default();
        match &self.scoring {
            None => defaults,
            Some(s) => ScoringConfig {
                normalizing_factor: s.normalizing_factor.or(defaults.normalizing_factor),
                language: s.language.clone().or(defaults.language),
                priority: s.priority.or(defaults.priority),
                rounding: s.rounding.or(defaults.rounding),
                strict_priority: s.strict_priority.or(defaults.strict_priority),
            },
        }
    }
}

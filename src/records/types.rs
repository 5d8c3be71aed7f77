use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::scoring::{
    calculate_score, RoundingMode, ScoreInput, ScoreResult, ScoringConfig, ALGORITHM_VERSION,
};
use crate::segment::Language;

pub const RECORD_STORE_VERSION: u32 = 1;

/// A scored task as it is persisted: the inputs needed to score it again,
/// plus the result and the rule version that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub text: String,
    pub language: Language,
    pub priority: i64,
    pub normalizing_factor: f64,
    pub word_count: u64,
    pub score: u64,
    pub algorithm_version: u32,
    /// Rounding that turned the weighted score into `score`
    #[serde(default)]
    pub rounding: RoundingMode,
    pub scored_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn from_result(name: impl Into<String>, input: &ScoreInput, result: &ScoreResult) -> Self {
        Self {
            name: name.into(),
            text: input.text.to_string(),
            language: input.language.clone(),
            priority: input.priority,
            normalizing_factor: input.normalizing_factor,
            word_count: result.word_count,
            score: result.score,
            algorithm_version: result.algorithm_version,
            rounding: result.breakdown.rounding,
            scored_at: Utc::now(),
        }
    }

    /// Scored under an older (or unknown) rule set.
    pub fn is_stale(&self) -> bool {
        self.algorithm_version != ALGORITHM_VERSION
    }

    fn input(&self) -> ScoreInput<'_> {
        ScoreInput {
            text: &self.text,
            language: self.language.clone(),
            priority: self.priority,
            normalizing_factor: self.normalizing_factor,
        }
    }

    /// Score the stored text again under the current rules, keeping the
    /// record's own rounding mode. `config` only supplies strict priority.
    pub fn rescore(&mut self, config: &ScoringConfig) -> Result<(), ScoreError> {
        let config = ScoringConfig {
            rounding: Some(self.rounding),
            ..config.clone()
        };
        let result = calculate_score(&self.input(), &config)?;
        self.word_count = result.word_count;
        self.score = result.score;
        self.algorithm_version = result.algorithm_version;
        self.scored_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreChange {
    pub name: String,
    pub old_score: u64,
    pub new_score: u64,
    pub old_version: u32,
}

#[derive(Debug, Default)]
pub struct RescoreSummary {
    pub rescored: Vec<ScoreChange>,
    pub failed: Vec<(String, ScoreError)>,
}

impl RescoreSummary {
    /// Records whose score actually moved.
    pub fn changed(&self) -> impl Iterator<Item = &ScoreChange> {
        self.rescored.iter().filter(|c| c.old_score != c.new_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    pub version: u32,
    #[serde(default)]
    pub records: Vec<ScoreRecord>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            version: RECORD_STORE_VERSION,
            records: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScoreRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Insert a record, replacing any record with the same name.
    /// Returns true if an existing record was replaced.
    pub fn upsert(&mut self, record: ScoreRecord) -> bool {
        if let Some(existing) = self.records.iter_mut().find(|r| r.name == record.name) {
            *existing = record;
            true
        } else {
            self.records.push(record);
            false
        }
    }

    pub fn stale(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter().filter(|r| r.is_stale())
    }

    /// Re-score every stale record in place. Records that fail keep their
    /// old values and are reported in the summary.
    pub fn rescore_stale(&mut self, config: &ScoringConfig) -> RescoreSummary {
        let mut summary = RescoreSummary::default();
        for record in self.records.iter_mut().filter(|r| r.is_stale()) {
            let old_score = record.score;
            let old_version = record.algorithm_version;
            match record.rescore(config) {
                Ok(()) => summary.rescored.push(ScoreChange {
                    name: record.name.clone(),
                    old_score,
                    new_score: record.score,
                    old_version,
                }),
                Err(e) => {
                    log::warn!("Could not rescore '{}': {}", record.name, e);
                    summary.failed.push((record.name.clone(), e));
                }
            }
        }
        summary
    }
}

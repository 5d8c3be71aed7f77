use super::config::ScoringConfig;
use super::priority::Priority;
use crate::segment::{Language, RuleSegmenter, SentenceSegmenter};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(factor) = config.normalizing_factor {
        if !factor.is_finite() {
            errors.push("scoring.normalizing_factor: must be a finite number".to_string());
        } else if factor < 0.0 {
            errors.push("scoring.normalizing_factor: must be non-negative".to_string());
        }
    }

    if let Some(ref language) = config.language {
        let parsed = Language::parse(language);
        if !RuleSegmenter::new().supports(&parsed) {
            errors.push(format!(
                "scoring.language: unsupported language '{}' - supported: {}",
                language,
                RuleSegmenter::supported_languages().join(", ")
            ));
        }
    }

    if let Some(priority) = config.priority {
        if Priority::from_level(priority).is_none() {
            errors.push(format!(
                "scoring.priority: invalid '{}' - must be between 1 and 5",
                priority
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

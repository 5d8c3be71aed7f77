use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::config::{RoundingMode, ScoringConfig};
use super::priority::Priority;
use super::stats::TextStats;
use crate::error::ScoreError;
use crate::segment::{Language, RuleSegmenter, SentenceSegmenter};

/// Version of the scoring rules. Bump whenever the arithmetic below changes
/// so scores stored under older rules can be told apart.
pub const ALGORITHM_VERSION: u32 = 1;

/// Every scored text earns at least this many points before priority.
pub const MIN_POINTS: u64 = 10;

const SCALE: f64 = 0.02;

/// Input for a single scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInput<'a> {
    pub text: &'a str,
    pub language: Language,
    pub priority: i64,
    pub normalizing_factor: f64,
}

impl<'a> ScoreInput<'a> {
    /// Input with the config's defaults for language, priority and factor.
    pub fn from_config(text: &'a str, config: &ScoringConfig) -> Self {
        Self {
            text,
            language: config.language(),
            priority: config.priority(),
            normalizing_factor: config.normalizing_factor(),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_normalizing_factor(mut self, normalizing_factor: f64) -> Self {
        self.normalizing_factor = normalizing_factor;
        self
    }
}

/// Intermediate values of a scoring run, for explaining a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub stats: TextStats,
    pub lix: f64,
    pub normalizing_factor: f64,
    pub scaling_factor: f64,
    pub raw_score: f64,
    /// Truncated raw score, floored at `MIN_POINTS`
    pub base_points: u64,
    pub priority: i64,
    pub priority_multiplier: f64,
    /// `base_points * priority_multiplier` before rounding
    pub weighted_score: f64,
    pub rounding: RoundingMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub word_count: u64,
    pub score: u64,
    pub algorithm_version: u32,
    pub breakdown: ScoreBreakdown,
}

/// Score `text` with the built-in segmenter and default rounding.
pub fn score(
    text: &str,
    priority: i64,
    normalizing_factor: f64,
    language: &str,
) -> Result<ScoreResult, ScoreError> {
    let input = ScoreInput::from_config(text, &ScoringConfig::default())
        .with_priority(priority)
        .with_normalizing_factor(normalizing_factor)
        .with_language(Language::parse(language));
    calculate_score(&input, &ScoringConfig::default())
}

pub fn calculate_score(
    input: &ScoreInput,
    config: &ScoringConfig,
) -> Result<ScoreResult, ScoreError> {
    calculate_score_with(&RuleSegmenter::new(), input, config)
}

/// Score a text using the given segmentation backend.
///
/// `config` only contributes the rounding mode and strict priority flag;
/// language, priority and factor come from `input`.
pub fn calculate_score_with(
    segmenter: &dyn SentenceSegmenter,
    input: &ScoreInput,
    config: &ScoringConfig,
) -> Result<ScoreResult, ScoreError> {
    let normalizing_factor = input.normalizing_factor;
    if !normalizing_factor.is_finite() {
        return Err(ScoreError::InvalidNormalizingFactor(normalizing_factor));
    }

    let priority_multiplier = match Priority::from_level(input.priority) {
        Some(priority) => priority.multiplier(),
        None if config.strict_priority() => {
            return Err(ScoreError::InvalidPriority(input.priority));
        }
        None => {
            warn!(
                "priority {} is outside 1..=5, leaving score unscaled",
                input.priority
            );
            1.0
        }
    };

    let sentences = segmenter.segment(input.text, &input.language)?;
    let stats = TextStats::from_sentences(&sentences);
    let lix = stats.lix().ok_or(ScoreError::EmptyInput)?;

    let scaling_factor = ((lix + normalizing_factor) / 2.0) * SCALE;
    let raw_score = stats.words as f64 * scaling_factor;
    // Truncate first, then floor; priority is applied to the floored value
    let base_points = (raw_score.trunc().max(0.0) as u64).max(MIN_POINTS);
    let weighted_score = base_points as f64 * priority_multiplier;
    let rounding = config.rounding();
    let score = rounding.apply(weighted_score);

    debug!(
        "scored {} sentences / {} words ({} long): lix={:.2} raw={:.2} base={} score={}",
        stats.sentences, stats.words, stats.long_words, lix, raw_score, base_points, score
    );

    Ok(ScoreResult {
        word_count: stats.words as u64,
        score,
        algorithm_version: ALGORITHM_VERSION,
        breakdown: ScoreBreakdown {
            stats,
            lix,
            normalizing_factor,
            scaling_factor,
            raw_score,
            base_points,
            priority: input.priority,
            priority_multiplier,
            weighted_score,
            rounding,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CAT: &str = "The cat sat on the mat.";

    /// One sentence of `count` short words, `long` of which are replaced by
    /// an 8-letter word.
    fn words_text(count: usize, long: usize) -> String {
        let mut words = vec!["cat"; count];
        for word in words.iter_mut().take(long) {
            *word = "elephant";
        }
        format!("{}.", words.join(" "))
    }

    #[test]
    fn test_cat_scenario() {
        let result = score(CAT, 3, 50.0, "en").unwrap();
        assert_eq!(result.word_count, 6);
        assert_eq!(result.score, 10);
        assert_eq!(result.algorithm_version, 1);

        let b = &result.breakdown;
        assert_eq!(b.stats.sentences, 1);
        assert_eq!(b.stats.long_words, 0);
        assert_eq!(b.lix, 6.0);
        assert!((b.scaling_factor - 0.56).abs() < 1e-12);
        assert!((b.raw_score - 3.36).abs() < 1e-12);
        assert_eq!(b.base_points, 10);
        assert_eq!(b.priority_multiplier, 1.0);
    }

    #[test]
    fn test_cat_scenario_high_priority() {
        let result = score(CAT, 5, 50.0, "en").unwrap();
        assert_eq!(result.score, 15);
    }

    #[test]
    fn test_hello_world_counts() {
        let result = score("Hello world. This is fine.", 3, 50.0, "en").unwrap();
        assert_eq!(result.breakdown.stats.sentences, 2);
        assert_eq!(result.word_count, 5);
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_unfloored_score() {
        // 40 words, 1 sentence: lix 40, factor 0.9, raw 36
        let text = words_text(40, 0);
        let result = score(&text, 3, 50.0, "en").unwrap();
        assert_eq!(result.breakdown.base_points, 36);
        assert_eq!(result.score, 36);
    }

    #[test]
    fn test_priority_table_applied_after_truncation() {
        let text = words_text(40, 0);
        let scores: Vec<u64> = (1..=5)
            .map(|p| score(&text, p, 50.0, "en").unwrap().score)
            .collect();
        assert_eq!(scores, vec![18, 27, 36, 45, 54]);
    }

    #[test]
    fn test_fractional_weighted_score_rounds_to_nearest() {
        // Floor of 10 at priority 2 gives 7.5
        let result = score(CAT, 2, 50.0, "en").unwrap();
        assert_eq!(result.breakdown.weighted_score, 7.5);
        assert_eq!(result.score, 8);
    }

    #[test]
    fn test_truncate_rounding_mode() {
        let config = ScoringConfig {
            rounding: Some(RoundingMode::Truncate),
            ..ScoringConfig::default()
        };
        let input = ScoreInput::from_config(CAT, &config).with_priority(2);
        let result = calculate_score(&input, &config).unwrap();
        assert_eq!(result.score, 7);
    }

    #[test]
    fn test_unknown_priority_is_neutral() {
        let result = score(CAT, 99, 50.0, "en").unwrap();
        assert_eq!(result.breakdown.priority_multiplier, 1.0);
        assert_eq!(result.score, 10);

        let result = score(CAT, 0, 50.0, "en").unwrap();
        assert_eq!(result.score, 10);

        for priority in [-1, 300, i64::MIN] {
            let result = score(&words_text(40, 0), priority, 50.0, "en").unwrap();
            assert_eq!(result.breakdown.priority_multiplier, 1.0);
            assert_eq!(result.score, 36);
        }
    }

    #[test]
    fn test_strict_priority_rejects_unknown() {
        let config = ScoringConfig {
            strict_priority: Some(true),
            ..ScoringConfig::default()
        };
        let input = ScoreInput::from_config(CAT, &config).with_priority(7);
        assert_eq!(
            calculate_score(&input, &config),
            Err(ScoreError::InvalidPriority(7))
        );
    }

    #[test]
    fn test_empty_text_fails() {
        assert_eq!(score("", 3, 50.0, "en"), Err(ScoreError::EmptyInput));
        assert_eq!(score("   \n  ", 3, 50.0, "en"), Err(ScoreError::EmptyInput));
    }

    #[test]
    fn test_punctuation_only_fails() {
        assert_eq!(score("... !!! ???", 3, 50.0, "en"), Err(ScoreError::EmptyInput));
    }

    #[test]
    fn test_unsupported_language_fails() {
        assert_eq!(
            score(CAT, 3, 50.0, "tlh"),
            Err(ScoreError::UnsupportedLanguage("tlh".to_string()))
        );
    }

    #[test]
    fn test_non_finite_normalizing_factor_fails() {
        assert!(matches!(
            score(CAT, 3, f64::NAN, "en"),
            Err(ScoreError::InvalidNormalizingFactor(_))
        ));
        assert!(matches!(
            score(CAT, 3, f64::INFINITY, "en"),
            Err(ScoreError::InvalidNormalizingFactor(_))
        ));
    }

    #[test]
    fn test_negative_normalizing_factor_hits_floor() {
        let result = score(CAT, 3, -1000.0, "en").unwrap();
        assert!(result.breakdown.raw_score < 0.0);
        assert_eq!(result.breakdown.base_points, MIN_POINTS);
    }

    #[test]
    fn test_long_words_raise_score() {
        // Same word and sentence count, more long words
        let plain = score(&words_text(40, 0), 3, 50.0, "en").unwrap();
        let complex = score(&words_text(40, 10), 3, 50.0, "en").unwrap();
        assert_eq!(plain.word_count, complex.word_count);
        assert_eq!(complex.breakdown.stats.long_words, 10);
        assert_eq!(complex.breakdown.lix, 65.0);
        assert_eq!(complex.score, 46);
        assert!(complex.score > plain.score);
    }

    #[test]
    fn test_normalizing_factor_changes_score() {
        let text = words_text(40, 0);
        let low = score(&text, 3, 10.0, "en").unwrap();
        let high = score(&text, 3, 90.0, "en").unwrap();
        assert!(high.score > low.score);
    }

    #[test]
    fn test_prose_with_quotes_dashes_and_parentheses() {
        // (text, sentences, words, long words, score)
        let cases = [
            (
                "Unlike the other indices, the ARI, along with the Coleman\u{2013}Liau, relies on \
                 a factor of characters per word, instead of the usual syllables per word. \
                 Although opinion varies on its accuracy as compared to the syllables/word and \
                 complex words indices, characters/word is often faster to calculate, as the \
                 number of characters is more readily and accurately counted by computer programs \
                 than syllables. In fact, this index was designed for real-time monitoring of \
                 readability on electric typewriters",
                3,
                76,
                27,
                84,
            ),
            (
                "We\u{2019}ve spent a lot of time and energy over the last few years trying to \
                 parse the evolution (or whatever you want to call it) of fandom, as passions, \
                 parasocial relationships, and good-old-fashioned \u{201c}being a dick\u{201d} \
                 have all collided in the constantly mutating cauldron that is the internet, \
                 often with wholly unpredictable results.",
                1,
                53,
                13,
                67,
            ),
            (
                "The performers at a concert are usually raised above the level of the audience \
                 on a stage. Concerts may be held in concert halls which are built for the \
                 purpose, or they may be held in any other suitable large building such as a \
                 school hall, a nightclub, a barn or a large house or castle. Some concerts are \
                 given to very large audiences in the open air. They may take place in a field or \
                 in a stadium. The music for these \u{201c}open-airs\u{201d} is usually amplified \
                 by loudspeakers so that large audiences can hear it.",
                5,
                96,
                18,
                84,
            ),
            (
                "Emerging from behind a cloud blind in a blaze orange miter and camouflaged \
                 vestments, His Holiness Pope Francis reportedly celebrated with fellow clergymen \
                 Thursday after bagging a highly coveted prize in this year\u{2019}s Vatican \
                 seraphim hunt: a six-winged trophy angel.",
                1,
                40,
                14,
                50,
            ),
        ];

        for (text, sentences, words, long_words, points) in cases {
            let result = score(text, 3, 50.0, "en").unwrap();
            let stats = &result.breakdown.stats;
            assert_eq!(
                (stats.sentences, stats.words, stats.long_words),
                (sentences, words, long_words),
                "{}",
                text
            );
            assert_eq!(result.score, points, "{}", text);
        }

        let last = score(cases[3].0, 3, 50.0, "en").unwrap();
        assert_eq!(last.breakdown.lix, 75.0);
        assert_eq!(last.breakdown.base_points, 50);
    }

    #[test]
    fn test_custom_segmenter() {
        struct OneSentence;
        impl SentenceSegmenter for OneSentence {
            fn segment(&self, text: &str, _: &Language) -> Result<Vec<String>, ScoreError> {
                Ok(vec![text.to_string()])
            }
            fn supports(&self, _: &Language) -> bool {
                true
            }
        }

        let config = ScoringConfig::default();
        // Two sentences for the rule segmenter, one for this backend
        let input = ScoreInput::from_config("Hello world. This is fine.", &config)
            .with_language(Language::parse("xx"));
        let result = calculate_score_with(&OneSentence, &input, &config).unwrap();
        assert_eq!(result.breakdown.stats.sentences, 1);
        assert_eq!(result.breakdown.lix, 5.0);
    }

    #[test]
    fn test_language_tag_variants_agree() {
        let a = score(CAT, 3, 50.0, "en").unwrap();
        let b = score(CAT, 3, 50.0, "EN-us").unwrap();
        assert_eq!(a, b);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn text_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec("[A-Za-z]{1,12}", 1..60).prop_map(|words| {
                words
                    .chunks(7)
                    .map(|chunk| format!("{}.", chunk.join(" ")))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
        }

        proptest! {
            #[test]
            fn score_is_deterministic(text in text_strategy(), priority in -3i64..300) {
                let first = score(&text, priority, 50.0, "en").unwrap();
                let second = score(&text, priority, 50.0, "en").unwrap();
                prop_assert_eq!(first, second);
            }

            #[test]
            fn base_points_never_below_floor(text in text_strategy(), factor in -200.0f64..200.0) {
                let result = score(&text, 3, factor, "en").unwrap();
                prop_assert!(result.breakdown.base_points >= MIN_POINTS);
                prop_assert!(result.score >= MIN_POINTS);
            }

            #[test]
            fn priority_scales_weighted_score_exactly(text in text_strategy()) {
                let low = score(&text, 1, 50.0, "en").unwrap();
                let normal = score(&text, 3, 50.0, "en").unwrap();
                let high = score(&text, 5, 50.0, "en").unwrap();
                let base = normal.breakdown.weighted_score;
                prop_assert_eq!(low.breakdown.weighted_score, base * 0.5);
                prop_assert_eq!(high.breakdown.weighted_score, base * 1.5);
                prop_assert!(high.score >= normal.score);
                prop_assert!(normal.score >= low.score);
            }

            #[test]
            fn word_count_matches_breakdown(text in text_strategy()) {
                let result = score(&text, 3, 50.0, "en").unwrap();
                prop_assert_eq!(result.word_count, result.breakdown.stats.words as u64);
                prop_assert!(result.word_count > 0);
            }
        }
    }
}

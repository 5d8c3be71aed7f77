//! Point scores for translation tasks.
//!
//! A text's score grows with its length and its LIX readability index
//! (average sentence length plus percentage of words with 7+ characters),
//! and is scaled by the task priority:
//!
//! ```
//! let result = point_score::score("The cat sat on the mat.", 5, 50.0, "en").unwrap();
//! assert_eq!(result.word_count, 6);
//! assert_eq!(result.score, 15);
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod records;
pub mod scoring;
pub mod segment;

pub use error::ScoreError;
pub use scoring::{calculate_score, score, ScoreInput, ScoreResult, ScoringConfig};
pub use segment::{Language, RuleSegmenter, SentenceSegmenter};

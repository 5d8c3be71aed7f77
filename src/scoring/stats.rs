use serde::{Deserialize, Serialize};

/// Words with at least this many characters count as long words.
pub const LONG_WORD_CHARS: usize = 7;

/// Counts the LIX index is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub sentences: usize,
    pub words: usize,
    pub long_words: usize,
}

impl TextStats {
    pub fn from_sentences<S: AsRef<str>>(sentences: &[S]) -> Self {
        let mut stats = TextStats {
            sentences: sentences.len(),
            ..TextStats::default()
        };
        for sentence in sentences {
            for word in sentence_words(sentence.as_ref()) {
                stats.words += 1;
                if is_long_word(&word) {
                    stats.long_words += 1;
                }
            }
        }
        stats
    }

    /// LIX readability index: average sentence length plus the percentage
    /// of long words. `None` when there are no sentences or no words.
    pub fn lix(&self) -> Option<f64> {
        if self.sentences == 0 || self.words == 0 {
            return None;
        }
        let words = self.words as f64;
        Some(words / self.sentences as f64 + (100.0 * self.long_words as f64) / words)
    }
}

/// Split one sentence into words: ASCII punctuation is removed first, then
/// the rest is split on whitespace. "don't" becomes "dont", "e-mail" becomes
/// "email".
pub fn sentence_words(sentence: &str) -> Vec<String> {
    let stripped: String = sentence
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    stripped.split_whitespace().map(String::from).collect()
}

pub fn is_long_word(word: &str) -> bool {
    word.chars().count() >= LONG_WORD_CHARS
}

use regex::Regex;
use std::sync::OnceLock;

use super::prefixes::{self, PrefixKind, PrefixTable};
use super::{Language, SentenceSegmenter};
use crate::error::ScoreError;

static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();
static QUESTION_BREAK: OnceLock<Regex> = OnceLock::new();
static ELLIPSIS_BREAK: OnceLock<Regex> = OnceLock::new();
static QUOTED_BREAK: OnceLock<Regex> = OnceLock::new();
static OPENER_BREAK: OnceLock<Regex> = OnceLock::new();
static PERIOD_WORD: OnceLock<Regex> = OnceLock::new();
static ACRONYM: OnceLock<Regex> = OnceLock::new();
static NEXT_STARTER: OnceLock<Regex> = OnceLock::new();
static LEADING_DIGIT: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("segmentation pattern must compile"))
}

fn paragraph() -> &'static Regex {
    compiled(&PARAGRAPH, r"\n\s*\n")
}

fn whitespace() -> &'static Regex {
    compiled(&WHITESPACE, r"\s+")
}

/// `?` or `!` followed by a sentence starter
fn question_break() -> &'static Regex {
    compiled(
        &QUESTION_BREAK,
        r#"([?!]) +(['"(\[¿¡\p{Pi}]*[\p{Lu}\p{Lo}])"#,
    )
}

/// Two or more dots followed by a sentence starter
fn ellipsis_break() -> &'static Regex {
    compiled(
        &ELLIPSIS_BREAK,
        r#"(\.\.+) +(['"(\[¿¡\p{Pi}]*[\p{Lu}\p{Lo}])"#,
    )
}

/// Terminal punctuation inside closing quotes or brackets
fn quoted_break() -> &'static Regex {
    compiled(
        &QUOTED_BREAK,
        r#"([?!.] *['")\]\p{Pf}]+) +(['"(\[¿¡\p{Pi}]* *[\p{Lu}\p{Lo}])"#,
    )
}

/// Terminal punctuation followed by an opening quote or bracket
fn opener_break() -> &'static Regex {
    compiled(
        &OPENER_BREAK,
        r#"([?!.]) +(['"(\[¿¡\p{Pi}]+ *[\p{Lu}\p{Lo}])"#,
    )
}

fn period_word() -> &'static Regex {
    compiled(&PERIOD_WORD, r#"([\w.\-]*)(['")\]%\p{Pf}]*)(\.+)$"#)
}

fn acronym() -> &'static Regex {
    compiled(&ACRONYM, r"(\.)[\p{Lu}\p{Lo}\-]+(\.+)$")
}

fn next_starter() -> &'static Regex {
    compiled(&NEXT_STARTER, r#"^( *['"(\[¿¡\p{Pi}]* *[\p{Lu}\p{Lo}0-9])"#)
}

fn leading_digit() -> &'static Regex {
    compiled(&LEADING_DIGIT, r"^[0-9]+")
}

/// Rule-based sentence splitter driven by per-language non-breaking prefixes.
///
/// Blank lines always end a sentence. Inside a paragraph, breaks are inserted
/// after `?`, `!`, ellipses and closing quotes when the next token looks like
/// a sentence start, and after a period unless the word before it is a known
/// abbreviation, an initial, or an uppercase acronym.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    pub fn new() -> Self {
        RuleSegmenter
    }

    /// Tags of every language this segmenter has prefix rules for.
    pub fn supported_languages() -> Vec<&'static str> {
        prefixes::supported_languages()
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str, language: &Language) -> Result<Vec<String>, ScoreError> {
        let table = prefixes::table(language.as_str())
            .ok_or_else(|| ScoreError::UnsupportedLanguage(language.to_string()))?;

        Ok(paragraph()
            .split(text)
            .flat_map(|para| split_paragraph(para, table))
            .collect())
    }

    fn supports(&self, language: &Language) -> bool {
        prefixes::table(language.as_str()).is_some()
    }
}

fn split_paragraph(paragraph: &str, table: &PrefixTable) -> Vec<String> {
    let text = whitespace().replace_all(paragraph.trim(), " ");
    if text.is_empty() {
        return Vec::new();
    }

    let text = question_break().replace_all(&text, "${1}\n${2}");
    let text = ellipsis_break().replace_all(&text, "${1}\n${2}");
    let text = quoted_break().replace_all(&text, "${1}\n${2}");
    let text = opener_break().replace_all(&text, "${1}\n${2}");

    // Remaining periods are decided word by word
    let words: Vec<&str> = text.split(' ').collect();
    let mut marked = String::with_capacity(text.len() + 8);
    for (i, word) in words.iter().enumerate() {
        marked.push_str(word);
        if let Some(next) = words.get(i + 1) {
            if breaks_after(word, next, table) {
                marked.push('\n');
            }
            marked.push(' ');
        }
    }

    marked
        .split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn breaks_after(word: &str, next: &str, table: &PrefixTable) -> bool {
    let Some(caps) = period_word().captures(word) else {
        return false;
    };
    let prefix = caps.get(1).map_or("", |m| m.as_str());
    let closing = caps.get(2).map_or("", |m| m.as_str());
    let kind = if prefix.is_empty() || !closing.is_empty() {
        None
    } else {
        table.kind(prefix)
    };

    if kind == Some(PrefixKind::Default) || acronym().is_match(word) {
        return false;
    }
    if !next_starter().is_match(next) {
        return false;
    }
    // "No. 5" keeps going, "No. Then" breaks
    !(kind == Some(PrefixKind::NumericOnly) && leading_digit().is_match(next))
}

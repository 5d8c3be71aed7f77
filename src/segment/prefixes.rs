//! Non-breaking prefix tables.
//!
//! One file per language under `nonbreaking_prefixes/`, in the same
//! line-based format as the Moses tokenizer's `nonbreaking_prefix.*` files.
//!
//! A word ending in a period is not a sentence end when the part before the
//! period is listed here. Entries marked `#NUMERIC_ONLY#` only suppress the
//! break when the next word starts with a digit (`No. 5`, `pp. 12`).
//!
//! Single uppercase letters (initials such as `J. R. Smith`) are non-breaking
//! in every language and are not repeated in the tables.

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixKind {
    Default,
    NumericOnly,
}

/// Prefix lookup for a single language.
#[derive(Debug, Default)]
pub struct PrefixTable {
    entries: HashMap<&'static str, PrefixKind>,
}

impl PrefixTable {
    /// Parse a prefix file: one entry per line, `#` starts a comment line,
    /// and a trailing `#NUMERIC_ONLY#` marks a numeric-only entry.
    fn parse(source: &'static str) -> Self {
        let mut entries = HashMap::new();
        for line in source.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let Some(prefix) = tokens.next() else {
                continue;
            };
            let kind = if tokens.any(|t| t == "#NUMERIC_ONLY#") {
                PrefixKind::NumericOnly
            } else {
                PrefixKind::Default
            };
            entries.insert(prefix, kind);
        }
        PrefixTable { entries }
    }

    pub fn kind(&self, prefix: &str) -> Option<PrefixKind> {
        if let Some(kind) = self.entries.get(prefix) {
            return Some(*kind);
        }
        let mut chars = prefix.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_uppercase() => Some(PrefixKind::Default),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const SOURCES: &[(&str, &str)] = &[
    ("ca", include_str!("nonbreaking_prefixes/ca.txt")),
    ("cs", include_str!("nonbreaking_prefixes/cs.txt")),
    ("da", include_str!("nonbreaking_prefixes/da.txt")),
    ("de", include_str!("nonbreaking_prefixes/de.txt")),
    ("el", include_str!("nonbreaking_prefixes/el.txt")),
    ("en", include_str!("nonbreaking_prefixes/en.txt")),
    ("es", include_str!("nonbreaking_prefixes/es.txt")),
    ("fi", include_str!("nonbreaking_prefixes/fi.txt")),
    ("fr", include_str!("nonbreaking_prefixes/fr.txt")),
    ("hu", include_str!("nonbreaking_prefixes/hu.txt")),
    ("is", include_str!("nonbreaking_prefixes/is.txt")),
    ("it", include_str!("nonbreaking_prefixes/it.txt")),
    ("lt", include_str!("nonbreaking_prefixes/lt.txt")),
    ("lv", include_str!("nonbreaking_prefixes/lv.txt")),
    ("nl", include_str!("nonbreaking_prefixes/nl.txt")),
    ("no", include_str!("nonbreaking_prefixes/no.txt")),
    ("pl", include_str!("nonbreaking_prefixes/pl.txt")),
    ("pt", include_str!("nonbreaking_prefixes/pt.txt")),
    ("ro", include_str!("nonbreaking_prefixes/ro.txt")),
    ("ru", include_str!("nonbreaking_prefixes/ru.txt")),
    ("sk", include_str!("nonbreaking_prefixes/sk.txt")),
    ("sl", include_str!("nonbreaking_prefixes/sl.txt")),
    ("sv", include_str!("nonbreaking_prefixes/sv.txt")),
    ("tr", include_str!("nonbreaking_prefixes/tr.txt")),
];

static TABLES: OnceLock<HashMap<&'static str, PrefixTable>> = OnceLock::new();

fn tables() -> &'static HashMap<&'static str, PrefixTable> {
    TABLES.get_or_init(|| {
        SOURCES
            .iter()
            .map(|(lang, source)| (*lang, PrefixTable::parse(source)))
            .collect()
    })
}

/// Prefix table for a normalized language tag, if the language is supported.
pub fn table(language: &str) -> Option<&'static PrefixTable> {
    tables().get(language)
}

/// All supported language tags, sorted.
pub fn supported_languages() -> Vec<&'static str> {
    SOURCES.iter().map(|(lang, _)| *lang).collect()
}

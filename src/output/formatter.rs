use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::{multiplier_for_level, Priority, ScoreResult};

/// A named text with its calculated score for display
pub struct ScoredText<'a> {
    pub name: &'a str,
    pub result: &'a ScoreResult,
}

/// Format a point score, e.g. "15 pts"
pub fn format_score(score: u64) -> String {
    if score == 1 {
        "1 pt".to_string()
    } else {
        format!("{} pts", score)
    }
}

fn format_priority(level: i64) -> String {
    match Priority::from_level(level) {
        Some(p) => p.to_string(),
        None => format!("{} (unscaled)", level),
    }
}

/// Format the full arithmetic behind a score (for --explain)
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let b = &result.breakdown;
    let header = format_score(result.score);
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let lines = [
        header,
        format!(
            "  Sentences: {}  Words: {}  Long words: {}",
            b.stats.sentences, b.stats.words, b.stats.long_words
        ),
        format!("  LIX: {:.2}", b.lix),
        format!(
            "  Scaling: (({:.2} + {}) / 2) x 0.02 = {:.4}",
            b.lix, b.normalizing_factor, b.scaling_factor
        ),
        format!(
            "  Raw: {} x {:.4} = {:.2}",
            b.stats.words, b.scaling_factor, b.raw_score
        ),
        format!("  Base points: {}", b.base_points),
        format!(
            "  Priority: {} -> x{}",
            format_priority(b.priority),
            multiplier_for_level(b.priority)
        ),
        format!(
            "  Weighted: {} ({:?} rounding -> {})",
            b.weighted_score, b.rounding, result.score
        ),
        format!("  Algorithm version: {}", result.algorithm_version),
    ];
    lines.join("\n")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format scored texts as a table with columns: Index, Score, Words, Name
/// No headers. Score column right-aligned, 7 chars wide
pub fn format_scored_table(texts: &[ScoredText], use_colors: bool) -> String {
    format_scored_table_with_width(texts, use_colors, get_terminal_width())
}

fn format_scored_table_with_width(
    texts: &[ScoredText],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if texts.is_empty() {
        return "No texts scored.".to_string();
    }

    let index_width = 3;
    let score_width = 7;
    let words_width = 8;
    let separator = "  ";

    texts
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", scored.result.score, width = score_width);
            let words_str = format!(
                "{:>width$}",
                format!("{}w", scored.result.word_count),
                width = words_width
            );

            let fixed_width = index_width + 1 + score_width + words_width + separator.len() * 2;
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(scored.name, width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_name(scored.name, 20),
                // No terminal (pipe), don't truncate
                None => scored.name.to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    words_str.dimmed(),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, words_str, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scored texts as tab-separated values for scripting
/// Columns: score, word_count, algorithm_version, name (no headers, no colors)
pub fn format_tsv(texts: &[ScoredText]) -> String {
    texts
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}",
                scored.result.score,
                scored.result.word_count,
                scored.result.algorithm_version,
                scored.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

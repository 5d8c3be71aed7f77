use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use point_score::output::{self, ScoredText};
use point_score::records::{self, ScoreRecord};
use point_score::scoring::{
    calculate_score, validate_scoring, ScoreInput, ScoreResult, ScoringConfig, ALGORITHM_VERSION,
};
use point_score::segment::{Language, RuleSegmenter};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

/// Per-call overrides of the configured scoring defaults
#[derive(Args, Debug)]
struct ScoreOverrides {
    /// Task priority, 1 (very low) to 5 (very high); other values leave the score unscaled
    #[arg(short, long, allow_negative_numbers = true)]
    priority: Option<i64>,

    /// Language tag used for sentence splitting (e.g. en, de, pt-BR)
    #[arg(short, long)]
    language: Option<String>,

    /// Normalizing factor blended into the LIX
    #[arg(short = 'n', long)]
    normalizing_factor: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single text given as argument, file, or on stdin
    Score {
        /// Text to score (reads stdin if neither TEXT nor --file is given)
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        overrides: ScoreOverrides,

        /// Show how the score was calculated
        #[arg(long, conflicts_with = "json")]
        explain: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Store the result under this name in the record file
        #[arg(long)]
        save: Option<String>,
    },
    /// Score every file matching the given glob patterns
    Batch {
        /// Glob patterns, e.g. "tasks/*.txt"
        #[arg(required = true)]
        patterns: Vec<String>,

        #[command(flatten)]
        overrides: ScoreOverrides,

        /// Store results in the record file, keyed by file path
        #[arg(long)]
        save: bool,

        /// Tab-separated output for scripting
        #[arg(long, conflicts_with = "json")]
        tsv: bool,

        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Re-score records that were scored under an older algorithm version
    Rescore {
        /// Show what would change without writing the record file
        #[arg(long)]
        dry_run: bool,
    },
    /// List supported language tags
    Languages,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "point-score")]
#[command(about = "Score translation tasks by text complexity and priority", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/point-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the record file (defaults to ~/.config/point-score/records.json)
    #[arg(short, long, global = true)]
    records: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn exit_with(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn read_text(text: Option<String>, file: Option<&Path>) -> Result<String> {
    let raw = match (text, file) {
        (Some(t), _) => t,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            buf
        }
    };
    Ok(raw.trim().to_string())
}

fn build_input<'a>(
    text: &'a str,
    scoring: &ScoringConfig,
    overrides: &ScoreOverrides,
) -> ScoreInput<'a> {
    let mut input = ScoreInput::from_config(text, scoring);
    if let Some(priority) = overrides.priority {
        input = input.with_priority(priority);
    }
    if let Some(ref language) = overrides.language {
        input = input.with_language(Language::parse(language));
    }
    if let Some(factor) = overrides.normalizing_factor {
        input = input.with_normalizing_factor(factor);
    }
    input
}

/// Expand glob patterns into a sorted, de-duplicated list of files
fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let entries =
            glob::glob(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping unreadable path: {}", e),
            }
        }
    }
    paths.sort();
    paths.dedup();
    Ok(paths)
}

fn save_to_records(path: &Path, new_records: Vec<ScoreRecord>) -> Result<()> {
    let mut store = records::load_records(path)?;
    for record in new_records {
        if store.upsert(record) {
            log::debug!("Replaced existing record");
        }
    }
    records::save_records(path, &store)
}

#[allow(clippy::too_many_arguments)]
fn run_score(
    text: Option<String>,
    file: Option<PathBuf>,
    overrides: &ScoreOverrides,
    scoring: &ScoringConfig,
    explain: bool,
    json: bool,
    save: Option<String>,
    records_path: &Path,
) {
    let text = read_text(text, file.as_deref())
        .unwrap_or_else(|e| exit_with(EXIT_IO, format!("Input error: {:#}", e)));

    let input = build_input(&text, scoring, overrides);
    let result = calculate_score(&input, scoring)
        .unwrap_or_else(|e| exit_with(EXIT_INPUT, format!("Scoring error: {}", e)));

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(s) => println!("{}", s),
            Err(e) => exit_with(EXIT_IO, format!("Failed to serialize result: {}", e)),
        }
    } else if explain {
        println!(
            "{}",
            output::format_breakdown(&result, output::should_use_colors())
        );
    } else {
        println!("{}", result.score);
    }

    if let Some(name) = save {
        let record = ScoreRecord::from_result(name, &input, &result);
        if let Err(e) = save_to_records(records_path, vec![record]) {
            exit_with(EXIT_IO, format!("Record error: {:#}", e));
        }
        log::info!("Saved record to {}", records_path.display());
    }
}

#[allow(clippy::too_many_arguments)]
fn run_batch(
    patterns: &[String],
    overrides: &ScoreOverrides,
    scoring: &ScoringConfig,
    save: bool,
    tsv: bool,
    json: bool,
    records_path: &Path,
    verbose: bool,
) {
    let paths = expand_patterns(patterns)
        .unwrap_or_else(|e| exit_with(EXIT_INPUT, format!("{:#}", e)));
    if paths.is_empty() {
        exit_with(EXIT_INPUT, "No files matched the given patterns.");
    }

    // Score each file; failures are reported and skipped
    let mut scored: Vec<(String, String, ScoreResult)> = Vec::new();
    for path in &paths {
        let name = path.display().to_string();
        let text = match read_text(None, Some(path)) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("{}: {:#}", name, e);
                continue;
            }
        };
        let input = build_input(&text, scoring, overrides);
        match calculate_score(&input, scoring) {
            Ok(result) => {
                log::debug!("{}: {} points", name, result.score);
                scored.push((name, text, result));
            }
            Err(e) => eprintln!("{}: {}", name, e),
        }
    }

    if scored.is_empty() {
        exit_with(EXIT_INPUT, "No files could be scored.");
    }

    if verbose {
        eprintln!("Scored {} of {} files", scored.len(), paths.len());
    }

    // Sort by score descending, then by name for ties
    scored.sort_by(|a, b| b.2.score.cmp(&a.2.score).then_with(|| a.0.cmp(&b.0)));

    let rows: Vec<ScoredText> = scored
        .iter()
        .map(|(name, _, result)| ScoredText { name, result })
        .collect();

    if json {
        let values: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| serde_json::json!({ "name": row.name, "result": row.result }))
            .collect();
        match serde_json::to_string_pretty(&values) {
            Ok(s) => println!("{}", s),
            Err(e) => exit_with(EXIT_IO, format!("Failed to serialize results: {}", e)),
        }
    } else if tsv {
        println!("{}", output::format_tsv(&rows));
    } else {
        println!(
            "{}",
            output::format_scored_table(&rows, output::should_use_colors())
        );
    }

    if save {
        let new_records = scored
            .iter()
            .map(|(name, text, result)| {
                let input = build_input(text, scoring, overrides);
                ScoreRecord::from_result(name.as_str(), &input, result)
            })
            .collect();
        if let Err(e) = save_to_records(records_path, new_records) {
            exit_with(EXIT_IO, format!("Record error: {:#}", e));
        }
        if verbose {
            eprintln!("Saved {} records to {}", scored.len(), records_path.display());
        }
    }
}

fn run_rescore(scoring: &ScoringConfig, dry_run: bool, records_path: &Path) {
    let mut store = records::load_records(records_path)
        .unwrap_or_else(|e| exit_with(EXIT_IO, format!("Record error: {:#}", e)));

    let stale = store.stale().count();
    if stale == 0 {
        println!(
            "All {} records are current (algorithm version {}).",
            store.records.len(),
            ALGORITHM_VERSION
        );
        return;
    }

    let summary = store.rescore_stale(scoring);
    for change in &summary.rescored {
        println!(
            "{}: {} -> {} (v{} -> v{})",
            change.name,
            change.old_score,
            change.new_score,
            change.old_version,
            ALGORITHM_VERSION
        );
    }
    for (name, e) in &summary.failed {
        eprintln!("{}: {}", name, e);
    }

    let changed = summary.changed().count();
    if dry_run {
        println!(
            "Dry run: {} stale records, {} scores would change. Nothing written.",
            stale, changed
        );
        return;
    }

    if let Err(e) = records::save_records(records_path, &store) {
        exit_with(EXIT_IO, format!("Record error: {:#}", e));
    }
    println!(
        "Rescored {} of {} stale records ({} scores changed).",
        summary.rescored.len(),
        stale,
        changed
    );
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    match cli.command {
        Commands::Languages => {
            for lang in RuleSegmenter::supported_languages() {
                println!("{}", lang);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Init => {
            let path = cli.config.clone().map(PathBuf::from);
            if let Err(e) = point_score::config::init::run_init_wizard(path) {
                exit_with(EXIT_CONFIG, format!("Init failed: {:#}", e));
            }
            std::process::exit(EXIT_SUCCESS);
        }
        _ => {}
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = point_score::config::load_config(config_path)
        .unwrap_or_else(|e| exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)));

    // Validate scoring config at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let records_path = match cli.records.or_else(|| config.records.map(PathBuf::from)) {
        Some(p) => p,
        None => records::get_records_path()
            .unwrap_or_else(|e| exit_with(EXIT_CONFIG, format!("Config error: {:#}", e))),
    };

    if cli.verbose {
        eprintln!(
            "Scoring: factor {}, language {}, priority {}, {:?} rounding",
            scoring.normalizing_factor(),
            scoring.language(),
            scoring.priority(),
            scoring.rounding()
        );
    }

    match cli.command {
        Commands::Score {
            text,
            file,
            overrides,
            explain,
            json,
            save,
        } => run_score(
            text,
            file,
            &overrides,
            &scoring,
            explain,
            json,
            save,
            &records_path,
        ),
        Commands::Batch {
            patterns,
            overrides,
            save,
            tsv,
            json,
        } => run_batch(
            &patterns,
            &overrides,
            &scoring,
            save,
            tsv,
            json,
            &records_path,
            cli.verbose,
        ),
        Commands::Rescore { dry_run } => run_rescore(&scoring, dry_run, &records_path),
        Commands::Languages | Commands::Init => {}
    }

    if cli.verbose {
        let elapsed = Duration::from_millis(start_time.elapsed().as_millis() as u64);
        eprintln!("Done in {}", humantime::format_duration(elapsed));
    }

    std::process::exit(EXIT_SUCCESS);
}

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};
use crate::scoring::{validate_scoring, Priority, RoundingMode, ScoringConfig};
use crate::segment::RuleSegmenter;

/// Prompt user with a message and return their trimmed input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{}", message).context("Failed to write prompt")?;
    out.flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let answer = prompt(input, out, &format!("{} [{}]: ", message, default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = prompt(input, out, &format!("{} [{}]: ", message, hint))?.to_lowercase();
    if answer.is_empty() {
        Ok(default_yes)
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}

/// Ask for each scoring setting until a valid value is given.
fn prompt_scoring<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<ScoringConfig> {
    let defaults = ScoringConfig::default();

    writeln!(out)?;
    writeln!(out, "The normalizing factor blends text complexity toward a fixed baseline.")?;
    writeln!(out, "Higher values flatten differences between easy and hard texts.")?;
    let normalizing_factor = loop {
        let answer = prompt_with_default(
            input,
            out,
            "Normalizing factor",
            &defaults.normalizing_factor().to_string(),
        )?;
        match answer.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => break v,
            _ => writeln!(out, "  Invalid: must be a non-negative number. Try again.")?,
        }
    };

    writeln!(out)?;
    writeln!(
        out,
        "Supported languages: {}",
        RuleSegmenter::supported_languages().join(", ")
    )?;
    let language = loop {
        let answer =
            prompt_with_default(input, out, "Default language", defaults.language().as_str())?;
        let candidate = ScoringConfig {
            language: Some(answer.clone()),
            ..ScoringConfig::default()
        };
        match validate_scoring(&candidate) {
            Ok(()) => break answer,
            Err(errors) => writeln!(out, "  Invalid: {}. Try again.", errors.join("; "))?,
        }
    };

    writeln!(out)?;
    for p in Priority::ALL {
        writeln!(out, "  {}  x{}", p, p.multiplier())?;
    }
    let priority = loop {
        let answer =
            prompt_with_default(input, out, "Default priority", &defaults.priority().to_string())?;
        match answer.parse::<i64>().ok().and_then(Priority::from_level) {
            Some(p) => break p.level(),
            None => writeln!(out, "  Invalid: must be between 1 and 5. Try again.")?,
        }
    };

    writeln!(out)?;
    let rounding = loop {
        let answer = prompt_with_default(input, out, "Rounding (nearest/truncate)", "nearest")?;
        match answer.to_lowercase().as_str() {
            "nearest" => break RoundingMode::Nearest,
            "truncate" => break RoundingMode::Truncate,
            _ => writeln!(out, "  Invalid: answer 'nearest' or 'truncate'. Try again.")?,
        }
    };

    let strict_priority = prompt_yes_no(input, out, "Reject priorities outside 1-5?", false)?;

    Ok(ScoringConfig {
        normalizing_factor: Some(normalizing_factor),
        language: Some(language),
        priority: Some(priority),
        rounding: Some(rounding),
        strict_priority: Some(strict_priority),
    })
}

/// Run the interactive init wizard on stdin/stdout.
///
/// If `default_path` is Some, uses that as the suggested config file path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run_wizard(&mut input, &mut out, default_path)
}

/// Wizard body, generic over its input and output streams.
pub fn run_wizard<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    default_path: Option<PathBuf>,
) -> Result<()> {
    writeln!(out, "Point Score Configuration Wizard")?;
    writeln!(out, "================================")?;

    let configure_scoring =
        prompt_yes_no(input, out, "Configure scoring? (n accepts defaults)", true)?;
    let scoring = if configure_scoring {
        prompt_scoring(input, out)?
    } else {
        ScoringConfig::default()
    };

    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    writeln!(out)?;
    let path_str = prompt_with_default(
        input,
        out,
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            input,
            out,
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            writeln!(out, "Aborted.")?;
            return Ok(());
        }
    }

    let config = Config {
        scoring: Some(scoring),
        records: None,
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    writeln!(out)?;
    writeln!(out, "Config written to {}", config_path.display())?;
    writeln!(out, "Run `point-score score \"Some text.\"` to get started.")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::io::Cursor;

    fn run(answers: &str, path: &std::path::Path) -> String {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        run_wizard(&mut input, &mut out, Some(path.to_path_buf())).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_accept_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        // Decline scoring setup, accept the suggested path
        let output = run("n\n\n", &path);
        assert!(output.contains("Config written to"));

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.scoring, Some(ScoringConfig::default()));
    }

    #[test]
    fn test_custom_scoring_with_retries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let answers = [
            "y",     // configure scoring
            "-5",    // invalid factor
            "40",    // factor
            "xx",    // invalid language
            "de",    // language
            "9",     // invalid priority
            "4",     // priority
            "floor", // invalid rounding
            "truncate",
            "y", // strict
            "",  // accept path
        ]
        .join("\n")
            + "\n";
        let output = run(&answers, &path);
        assert!(output.contains("must be a non-negative number"));
        assert!(output.contains("unsupported language 'xx'"));
        assert!(output.contains("must be between 1 and 5"));

        let scoring = load_config(Some(path)).unwrap().scoring.unwrap();
        assert_eq!(scoring.normalizing_factor, Some(40.0));
        assert_eq!(scoring.language, Some("de".to_string()));
        assert_eq!(scoring.priority, Some(4));
        assert_eq!(scoring.rounding, Some(RoundingMode::Truncate));
        assert_eq!(scoring.strict_priority, Some(true));
    }

    #[test]
    fn test_existing_config_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "records: keep.json\n").unwrap();

        let output = run("n\n\nn\n", &path);
        assert!(output.contains("Aborted."));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "records: keep.json\n");
    }
}

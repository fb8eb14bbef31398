use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::{Color, Colorize};
use serde::Deserialize;

/// ffuf JSON output, reduced to what gets printed.
#[derive(Debug, Clone, Deserialize)]
pub struct FfufOutput {
    #[serde(default)]
    pub results: Vec<FfufResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FfufResult {
    pub url: String,
    pub status: u16,
    pub lines: u64,
}

/// 2xx green, 3xx yellow, 4xx red, 5xx magenta, anything else uncolored.
pub fn status_color(status: u16) -> Option<Color> {
    match status {
        200..=299 => Some(Color::Green),
        300..=399 => Some(Color::Yellow),
        400..=499 => Some(Color::Red),
        500..=599 => Some(Color::Magenta),
        _ => None,
    }
}

pub fn format_result(result: &FfufResult) -> String {
    let status = result.status.to_string();
    let status = match status_color(result.status) {
        Some(color) => status.color(color).to_string(),
        None => status,
    };
    format!("{} {} {}", result.url, status, result.lines)
}

/// Expand glob patterns; patterns that match nothing contribute nothing.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let paths = glob::glob(pattern).with_context(|| format!("invalid pattern {}", pattern))?;
        for path in paths.flatten() {
            files.push(path);
        }
    }
    Ok(files)
}

pub fn load_output(path: &Path) -> Result<FfufOutput> {
    let data = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed = serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(parsed)
}

/// Print every existing file's results. Missing files are skipped; malformed JSON is an error.
/// Returns the number of result records printed.
pub fn report_files<W: Write>(files: &[PathBuf], out: &mut W) -> Result<usize> {
    let mut total = 0;
    for file in files {
        if !file.is_file() {
            tracing::debug!(path = %file.display(), "Skipping missing result file");
            continue;
        }
        let output = load_output(file)?;
        if output.results.is_empty() {
            writeln!(out, "\nNo results found in {}.", file.display())?;
            continue;
        }
        writeln!(out, "\nResults from {}:", file.display())?;
        for result in &output.results {
            writeln!(out, "{}", format_result(result))?;
        }
        total += output.results.len();
    }
    Ok(total)
}

/// `report` subcommand entry point.
pub fn run_report(patterns: &[String]) -> Result<()> {
    let files = expand_patterns(patterns)?;
    if files.is_empty() {
        anyhow::bail!("No JSON files found.");
    }
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    report_files(&files, &mut lock)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_classes() {
        assert_eq!(status_color(200), Some(Color::Green));
        assert_eq!(status_color(301), Some(Color::Yellow));
        assert_eq!(status_color(403), Some(Color::Red));
        assert_eq!(status_color(503), Some(Color::Magenta));
        assert_eq!(status_color(102), None);
        assert_eq!(status_color(600), None);
    }

    #[test]
    fn uncolored_status_is_plain() {
        let r = FfufResult { url: "https://a/x".into(), status: 100, lines: 4 };
        assert_eq!(format_result(&r), "https://a/x 100 4");
    }

    #[test]
    fn colored_status_keeps_fields() {
        let r = FfufResult { url: "https://a/admin".into(), status: 200, lines: 12 };
        let line = format_result(&r);
        assert!(line.starts_with("https://a/admin "));
        assert!(line.contains("200"));
        assert!(line.ends_with(" 12"));
    }
}

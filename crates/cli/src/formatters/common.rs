//! Common utilities for formatters.
//!
//! Responsibilities:
//! - Standardized missing/null value handling.
//! - Writing output to stdout or atomically to a file.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::OutputFormat;

/// String representation for missing or empty values in human-facing formats.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// The contained string, or [`DEFAULT_MISSING_VALUE`] if absent or blank.
pub fn format_missing(opt: Option<&str>) -> &str {
    match opt {
        Some(s) if !s.trim().is_empty() => s,
        _ => DEFAULT_MISSING_VALUE,
    }
}

/// Print `output` to stdout, or write it to `output_file` when given.
pub fn output_result(
    output: &str,
    format: OutputFormat,
    output_file: Option<&PathBuf>,
) -> Result<()> {
    if let Some(path) = output_file {
        write_to_file(output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!(
            "Results written to {} ({:?} format)",
            path.display(),
            format
        );
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Write formatted output to a file atomically.
///
/// Creates parent directories if needed, writes to a temp file in the same
/// directory, then renames it into place.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    // If path has no parent (e.g., just "events.json"), use current directory
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if parent_dir != Path::new(".") {
        fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    }

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

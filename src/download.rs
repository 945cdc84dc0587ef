// Saving conversion results to disk
//
// Given a payload and the original file name, writes the canonical JSON to
// `<output_dir>/<basename>.json`. The write stages through a named temporary
// file in the target directory and atomically persists it, so a failed write
// never leaves a half-saved artifact; the temporary handle is released by
// the persist.

use crate::payload::ResultPayload;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The saved file's stem: everything before the first `.` of the original
/// name ("report.pdf" -> "report", "archive.tar.gz" -> "archive").
pub fn basename(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Suggested name for the saved artifact.
pub fn suggested_name(file_name: &str) -> String {
    format!("{}.json", basename(file_name))
}

/// Write the payload's canonical text to `<output_dir>/<basename>.json`.
/// Returns the path written.
pub fn save_json(payload: &ResultPayload, file_name: &str, output_dir: &Path) -> Result<PathBuf> {
    let text = payload.canonical_text()?;
    let target = output_dir.join(suggested_name(file_name));

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let mut staged = NamedTempFile::new_in(output_dir).context("staging save file")?;
    staged.write_all(text.as_bytes()).context("writing result")?;
    staged
        .persist(&target)
        .with_context(|| format!("saving {}", target.display()))?;

    tracing::info!(path = %target.display(), bytes = text.len(), "saved conversion result");
    Ok(target)
}

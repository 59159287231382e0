//! JSON writer for run results.

use crate::catalog::RunResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Writes the whole run result as UTF-8 JSON.
pub fn write_json(result: &RunResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize run result")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))
}

//! Export of run results to JSON and XLSX files.

pub mod json;
pub mod table;
pub mod xlsx;

use crate::catalog::RunResult;
use crate::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

pub use table::{build_table, Cell, Row, Table};

/// Which files a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExportMode {
    #[default]
    Json,
    Xlsx,
    Both,
}

impl ExportMode {
    /// Formats written for this mode, in write order.
    pub fn formats(&self) -> &'static [ExportFormat] {
        match self {
            ExportMode::Json => &[ExportFormat::Json],
            ExportMode::Xlsx => &[ExportFormat::Xlsx],
            ExportMode::Both => &[ExportFormat::Json, ExportFormat::Xlsx],
        }
    }
}

impl FromStr for ExportMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "JSON" => Ok(ExportMode::Json),
            "XLSX" => Ok(ExportMode::Xlsx),
            "BOTH" => Ok(ExportMode::Both),
            _ => Err(ConfigError::InvalidExportMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExportMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExportMode> for String {
    fn from(mode: ExportMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportMode::Json => write!(f, "json"),
            ExportMode::Xlsx => write!(f, "xlsx"),
            ExportMode::Both => write!(f, "both"),
        }
    }
}

/// A single output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// What happened for one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// No items, only lookup errors; nothing written.
    ErrorsOnly,
    /// No items and no errors; nothing written.
    NoData,
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutcome::Written(path) => write!(f, "wrote {}", path.display()),
            ExportOutcome::ErrorsOnly => write!(f, "errors only, no file written"),
            ExportOutcome::NoData => write!(f, "no data, no file written"),
        }
    }
}

/// Per-format results of an export. One failure never prevents the next format.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub entries: Vec<(ExportFormat, Result<ExportOutcome>)>,
}

impl ExportReport {
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|(_, r)| r.is_err())
    }

    /// Paths of all files actually written.
    pub fn written(&self) -> Vec<&Path> {
        self.entries
            .iter()
            .filter_map(|(_, r)| match r {
                Ok(ExportOutcome::Written(path)) => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }
}

/// Returns the target path for a format, named from the run timestamp.
pub fn output_path(result: &RunResult, format: ExportFormat, dir: &Path) -> PathBuf {
    dir.join(format!("{}.{}", result.file_stem(), format.extension()))
}

/// Exports the run result in every format the mode asks for.
pub fn export(result: &RunResult, mode: ExportMode, dir: &Path) -> ExportReport {
    let entries = mode
        .formats()
        .iter()
        .map(|&format| {
            let outcome = export_one(result, format, dir);
            match &outcome {
                Ok(o) => info!("{} export: {}", format.extension(), o),
                Err(e) => warn!("{} export failed: {:#}", format.extension(), e),
            }
            (format, outcome)
        })
        .collect();

    ExportReport { entries }
}

fn export_one(result: &RunResult, format: ExportFormat, dir: &Path) -> Result<ExportOutcome> {
    if result.items.is_empty() {
        return Ok(if result.errors.is_empty() {
            ExportOutcome::NoData
        } else {
            ExportOutcome::ErrorsOnly
        });
    }

    let path = output_path(result, format, dir);
    match format {
        ExportFormat::Json => json::write_json(result, &path)?,
        ExportFormat::Xlsx => xlsx::write_xlsx(&build_table(&result.items), &path)?,
    }

    Ok(ExportOutcome::Written(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LookupError, ProductRecord, Region};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn make_result() -> RunResult {
        let started = Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap();
        RunResult::new(&[Region::Uk], started)
    }

    fn make_record() -> ProductRecord {
        ProductRecord {
            sku: "M40995".to_string(),
            product_id: "nvprod1".to_string(),
            name: "Neverfull MM".to_string(),
            price: 1690.0,
            currency: "GBP".to_string(),
            description: String::new(),
            images: vec!["https://img/a.png".to_string()],
            color: String::new(),
            region: "UK".to_string(),
            fetch_time: "2024-03-01T09:15:00Z".to_string(),
        }
    }

    #[test]
    fn test_export_mode_parsing() {
        assert_eq!("json".parse::<ExportMode>().unwrap(), ExportMode::Json);
        assert_eq!("JSON".parse::<ExportMode>().unwrap(), ExportMode::Json);
        assert_eq!("Xlsx".parse::<ExportMode>().unwrap(), ExportMode::Xlsx);
        assert_eq!(" both ".parse::<ExportMode>().unwrap(), ExportMode::Both);

        let err = "csv".parse::<ExportMode>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidExportMode("csv".to_string()));
    }

    #[test]
    fn test_export_mode_serde() {
        assert_eq!(serde_json::to_string(&ExportMode::Both).unwrap(), "\"both\"");
        let parsed: ExportMode = serde_json::from_str("\"XLSX\"").unwrap();
        assert_eq!(parsed, ExportMode::Xlsx);
        assert!(serde_json::from_str::<ExportMode>("\"pdf\"").is_err());
    }

    #[test]
    fn test_export_mode_formats() {
        assert_eq!(ExportMode::Json.formats(), &[ExportFormat::Json]);
        assert_eq!(ExportMode::Both.formats(), &[ExportFormat::Json, ExportFormat::Xlsx]);
    }

    #[test]
    fn test_output_path() {
        let result = make_result();
        let path = output_path(&result, ExportFormat::Xlsx, Path::new("/out"));
        assert_eq!(path, PathBuf::from("/out/2024-03-01T09-15-00Z.xlsx"));
    }

    #[test]
    fn test_export_no_data() {
        let dir = tempdir().unwrap();
        let report = export(&make_result(), ExportMode::Both, dir.path());

        assert_eq!(report.entries.len(), 2);
        for (_, outcome) in &report.entries {
            assert_eq!(outcome.as_ref().unwrap(), &ExportOutcome::NoData);
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_errors_only() {
        let dir = tempdir().unwrap();
        let mut result = make_result();
        result.errors.push(LookupError {
            sku: "BAD".to_string(),
            region: "UK".to_string(),
            errors: vec![serde_json::json!("not found")],
        });

        let report = export(&result, ExportMode::Xlsx, dir.path());
        assert_eq!(report.entries[0].1.as_ref().unwrap(), &ExportOutcome::ErrorsOnly);
        assert!(report.written().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_both_writes_two_files() {
        let dir = tempdir().unwrap();
        let mut result = make_result();
        result.items.push(make_record());

        let report = export(&result, ExportMode::Both, dir.path());
        assert!(!report.has_failures());

        let written = report.written();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0], dir.path().join("2024-03-01T09-15-00Z.json"));
        assert_eq!(written[1], dir.path().join("2024-03-01T09-15-00Z.xlsx"));
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_export_failure_does_not_block_other_format() {
        let dir = tempdir().unwrap();
        let mut result = make_result();
        result.items.push(make_record());

        // A directory squatting on the JSON path makes only that write fail.
        std::fs::create_dir(dir.path().join("2024-03-01T09-15-00Z.json")).unwrap();

        let report = export(&result, ExportMode::Both, dir.path());
        assert!(report.has_failures());
        assert!(report.entries[0].1.is_err());
        assert_eq!(
            report.entries[1].1.as_ref().unwrap(),
            &ExportOutcome::Written(dir.path().join("2024-03-01T09-15-00Z.xlsx"))
        );
    }
}

//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::export::ExportMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Region codes to query, in order
    #[serde(default)]
    pub regions: Vec<String>,

    /// SKUs to look up, in order
    #[serde(default)]
    pub skus: Vec<String>,

    /// Output file format(s)
    #[serde(default)]
    pub export: ExportMode,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Pause after each SKU lookup in milliseconds
    #[serde(default = "default_sku_delay_ms")]
    pub sku_delay_ms: u64,

    /// Pause after each region in milliseconds
    #[serde(default = "default_region_delay_ms")]
    pub region_delay_ms: u64,

    /// Random jitter added to each pause (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory export files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_sku_delay_ms() -> u64 {
    500
}

fn default_region_delay_ms() -> u64 {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            skus: Vec::new(),
            export: ExportMode::default(),
            proxy: None,
            sku_delay_ms: default_sku_delay_ms(),
            region_delay_ms: default_region_delay_ms(),
            delay_jitter_ms: 0,
            timeout_secs: default_timeout_secs(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("lv-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    ///
    /// An unparseable `LV_EXPORT` is an error; unparseable delays are ignored.
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(regions) = std::env::var("LV_REGIONS") {
            self.regions = split_list(&regions);
        }

        if let Ok(skus) = std::env::var("LV_SKUS") {
            self.skus = split_list(&skus);
        }

        if let Ok(export) = std::env::var("LV_EXPORT") {
            self.export = export.parse()?;
        }

        if let Ok(proxy) = std::env::var("LV_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("LV_SKU_DELAY") {
            if let Ok(d) = delay.parse() {
                self.sku_delay_ms = d;
            }
        }

        if let Ok(delay) = std::env::var("LV_REGION_DELAY") {
            if let Ok(d) = delay.parse() {
                self.region_delay_ms = d;
            }
        }

        if let Ok(dir) = std::env::var("LV_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        Ok(self)
    }
}

/// Splits a comma-separated list, dropping whitespace and empty entries.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.regions.is_empty());
        assert!(config.skus.is_empty());
        assert_eq!(config.export, ExportMode::Json);
        assert!(config.proxy.is_none());
        assert_eq!(config.sku_delay_ms, 500);
        assert_eq!(config.region_delay_ms, 2000);
        assert_eq!(config.delay_jitter_ms, 0);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("uk, us ,jp"), vec!["uk", "us", "jp"]);
        assert_eq!(split_list("M 40995,,N41358 "), vec!["M40995", "N41358"]);
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            regions = ["uk", "fr"]
            skus = ["M40995"]
            export = "BOTH"
            sku_delay_ms = 100
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.regions, vec!["uk", "fr"]);
        assert_eq!(config.skus, vec!["M40995"]);
        assert_eq!(config.export, ExportMode::Both);
        assert_eq!(config.sku_delay_ms, 100);
        assert_eq!(config.region_delay_ms, 2000);
    }

    #[test]
    fn test_config_from_toml_invalid_export() {
        let result: Result<Config, _> = toml::from_str(r#"export = "csv""#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid export mode"));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            regions = ["jp"]
            export = "xlsx"
            output_dir = "/tmp/lv"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.regions, vec!["jp"]);
        assert_eq!(config.export, ExportMode::Xlsx);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/lv"));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"skus = ["N41358", "M40995"]"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.skus, vec!["N41358", "M40995"]);
    }

    // Single test touching process env so parallel tests don't race on it.
    #[test]
    fn test_config_with_env() {
        let keys = ["LV_REGIONS", "LV_SKUS", "LV_EXPORT", "LV_SKU_DELAY", "LV_REGION_DELAY"];
        let saved: Vec<_> = keys.iter().map(|k| std::env::var(k).ok()).collect();

        std::env::set_var("LV_REGIONS", "uk, hk");
        std::env::set_var("LV_SKUS", "M40995,N41358");
        std::env::set_var("LV_EXPORT", "Both");
        std::env::set_var("LV_SKU_DELAY", "not_a_number");
        std::env::set_var("LV_REGION_DELAY", "10");

        let config = Config::new().with_env().unwrap();
        assert_eq!(config.regions, vec!["uk", "hk"]);
        assert_eq!(config.skus, vec!["M40995", "N41358"]);
        assert_eq!(config.export, ExportMode::Both);
        assert_eq!(config.sku_delay_ms, 500);
        assert_eq!(config.region_delay_ms, 10);

        std::env::set_var("LV_EXPORT", "pdf");
        let err = Config::new().with_env().unwrap_err().to_string();
        assert!(err.contains("Invalid export mode"));

        for (key, value) in keys.iter().zip(saved) {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

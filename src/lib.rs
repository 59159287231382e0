//! lv-crawler - Louis Vuitton catalog fetcher
//!
//! Resolves SKUs against the public catalog API of several regional
//! storefronts and exports the aggregated product metadata to JSON and XLSX.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;

pub use catalog::{ProductRecord, Region, RunResult};
pub use config::Config;
pub use error::ConfigError;
pub use export::ExportMode;

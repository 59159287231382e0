//! Configuration errors raised before any network activity.

use thiserror::Error;

/// Invalid run configuration. Every variant aborts the run before the first request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid region '{code}'. Valid regions: {valid}")]
    InvalidRegion { code: String, valid: String },

    #[error("Invalid export mode '{0}'. Use: json, xlsx, both")]
    InvalidExportMode(String),

    #[error("No regions given. Pass --regions or set LV_REGIONS")]
    EmptyRegions,

    #[error("No SKUs given. Pass --skus or set LV_SKUS")]
    EmptySkus,
}

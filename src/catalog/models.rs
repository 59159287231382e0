//! Data models for catalog responses, product records and run results.

use crate::catalog::regions::{Region, RegionEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Price used when the upstream variant carries none.
pub const MISSING_PRICE: f64 = -1.0;

/// Response of the `catalog/sku/{sku}/persodetails` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDetails {
    #[serde(default)]
    pub errors: Vec<Value>,
    #[serde(default)]
    pub product_id: Option<Value>,
}

impl SkuDetails {
    /// Returns the product id as text, if the response carries a usable one.
    pub fn product_id(&self) -> Option<String> {
        match self.product_id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Response of the `catalog/product/{productId}` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDetail {
    #[serde(default)]
    pub errors: Vec<Value>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model: Vec<ModelVariant>,
}

/// One purchasable variant of a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVariant {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub offers: Option<Offers>,
    #[serde(default)]
    pub disambiguating_description: Option<String>,
    #[serde(default)]
    pub image: Vec<ImageObject>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offers {
    #[serde(default)]
    pub price_specification: Option<PriceSpecification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSpecification {
    #[serde(default)]
    pub price: Option<PriceValue>,
    #[serde(default)]
    pub price_currency: Option<String>,
}

/// Upstream prices arrive either as numbers or as numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    /// Returns the price as a finite number. `NaN` and infinities count as absent.
    pub fn as_f64(&self) -> Option<f64> {
        let price = match self {
            PriceValue::Number(n) => Some(*n),
            PriceValue::Text(s) => s.trim().parse::<f64>().ok(),
        };
        price.filter(|p| p.is_finite())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageObject {
    #[serde(default)]
    pub content_url: Option<String>,
}

/// Normalized product metadata for one SKU in one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub sku: String,
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub description: String,
    pub images: Vec<String>,
    pub color: String,
    pub region: String,
    pub fetch_time: String,
}

/// Upstream "no such product" answer for a SKU/region pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupError {
    pub sku: String,
    pub region: String,
    /// The `errors` array exactly as the API returned it.
    pub errors: Vec<Value>,
}

/// Result of looking up one SKU in one region.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(ProductRecord),
    NotFound(LookupError),
    /// No product id and no error list, or an empty product body.
    Missing,
}

/// Everything gathered during one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub items: Vec<ProductRecord>,
    pub regions: Vec<RegionEntry>,
    /// Run start, UTC, second precision, without zone suffix.
    pub fetch_time: String,
    pub errors: Vec<LookupError>,
}

impl RunResult {
    /// Creates an empty result whose timestamp is frozen at `started`.
    pub fn new(regions: &[Region], started: DateTime<Utc>) -> Self {
        Self {
            items: Vec::new(),
            regions: regions.iter().map(Region::entry).collect(),
            fetch_time: started.format("%Y-%m-%dT%H:%M:%S").to_string(),
            errors: Vec::new(),
        }
    }

    /// Timestamp stamped on every record, with the UTC `Z` suffix.
    pub fn record_time(&self) -> String {
        format!("{}Z", self.fetch_time)
    }

    /// Export file name without extension, e.g. `2024-03-01T09-15-00Z`.
    pub fn file_stem(&self) -> String {
        format!("{}Z", self.fetch_time.replace(':', "-"))
    }

    /// Appends the outcome of one lookup. Duplicates are kept.
    pub fn record(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Found(item) => self.items.push(item),
            FetchOutcome::NotFound(error) => self.errors.push(error),
            FetchOutcome::Missing => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.errors.is_empty()
    }
}

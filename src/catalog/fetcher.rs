//! Two-stage product lookup: SKU to product id, then product detail.

use crate::catalog::client::{CatalogApi, CatalogResponse};
use crate::catalog::markup::strip_markup;
use crate::catalog::models::{
    FetchOutcome, LookupError, ProductDetail, ProductRecord, SkuDetails, MISSING_PRICE,
};
use crate::catalog::regions::Region;
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

/// Looks up one SKU in one region.
///
/// Upstream "not found" answers become [`FetchOutcome::NotFound`]; network and
/// parse failures are returned as errors and end the run. So is an `errors`
/// payload on the product detail call, since the SKU was already resolved.
pub async fn fetch_product(
    api: &impl CatalogApi,
    region: Region,
    sku: &str,
    fetch_time: &str,
) -> Result<FetchOutcome> {
    let sku = sku.trim().to_uppercase();
    info!("Looking up {} in {}", sku, region);

    let response = api.sku_details(region, &sku).await?;
    let details: SkuDetails = parse_body(&response, "SKU details", &sku)?;

    if !details.errors.is_empty() {
        warn!("No data for {} in {} ({} upstream errors)", sku, region, details.errors.len());
        return Ok(FetchOutcome::NotFound(LookupError {
            sku,
            region: region.code().to_string(),
            errors: details.errors,
        }));
    }

    let Some(product_id) = details.product_id() else {
        warn!("No productId for {} in {} and no upstream error; skipping", sku, region);
        return Ok(FetchOutcome::Missing);
    };

    let response = api.product(region, &product_id).await?;
    let body: Value = parse_body(&response, "product detail", &product_id)?;
    if is_blank(&body) {
        warn!("Empty product detail for {} ({}) in {}; skipping", sku, product_id, region);
        return Ok(FetchOutcome::Missing);
    }

    let detail: ProductDetail = serde_json::from_value(body)
        .with_context(|| format!("Unexpected product detail shape for {}", product_id))?;
    if !detail.errors.is_empty() {
        bail!(
            "Product detail for {} ({}) returned {} upstream errors (HTTP status {})",
            product_id,
            sku,
            detail.errors.len(),
            response.status
        );
    }

    Ok(FetchOutcome::Found(build_record(detail, &sku, &product_id, region, fetch_time)))
}

/// Builds the normalized record from a product detail response.
///
/// Only the variant whose identifier equals `sku` contributes price, currency,
/// description, images and color; without one, those keep their defaults.
pub fn build_record(
    detail: ProductDetail,
    sku: &str,
    product_id: &str,
    region: Region,
    fetch_time: &str,
) -> ProductRecord {
    let mut record = ProductRecord {
        sku: String::new(),
        product_id: product_id.to_string(),
        name: detail.name,
        price: MISSING_PRICE,
        currency: String::new(),
        description: String::new(),
        images: Vec::new(),
        color: String::new(),
        region: region.code().to_string(),
        fetch_time: fetch_time.to_string(),
    };

    let Some(variant) = detail.model.into_iter().find(|v| v.identifier == sku) else {
        warn!("Product {} has no variant matching {}", product_id, sku);
        return record;
    };

    let spec = variant.offers.and_then(|o| o.price_specification);
    let (price, currency) = match spec {
        Some(spec) => (spec.price.and_then(|p| p.as_f64()), spec.price_currency),
        None => (None, None),
    };

    record.sku = variant.identifier;
    record.price = price.unwrap_or(MISSING_PRICE);
    record.currency = if region == Region::Us {
        "USD".to_string()
    } else {
        currency.unwrap_or_default()
    };
    record.description =
        variant.disambiguating_description.as_deref().map(strip_markup).unwrap_or_default();
    record.images = variant.image.into_iter().filter_map(|i| i.content_url).collect();
    record.color = variant.color.unwrap_or_default();

    record
}

fn parse_body<T: DeserializeOwned>(
    response: &CatalogResponse,
    what: &str,
    key: &str,
) -> Result<T> {
    serde_json::from_str(&response.body).with_context(|| {
        format!("Failed to parse {} for {} (HTTP status {})", what, key, response.status)
    })
}

fn is_blank(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

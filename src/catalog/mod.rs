//! Catalog API access: regions, HTTP client, lookup and data models.

pub mod client;
pub mod fetcher;
pub mod markup;
pub mod models;
pub mod regions;

pub use client::{CatalogApi, CatalogClient, CatalogResponse};
pub use fetcher::fetch_product;
pub use models::{FetchOutcome, LookupError, ProductRecord, RunResult};
pub use regions::{Region, RegionEntry};

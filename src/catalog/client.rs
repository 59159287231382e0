//! HTTP client for the catalog API using wreq for TLS fingerprint emulation.

use crate::catalog::regions::Region;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Raw catalog API answer. The body is kept regardless of status,
/// since unknown SKUs come back as 4xx with an `errors` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for catalog lookups - enables mocking for tests.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Resolves a SKU to its product summary (`persodetails`).
    async fn sku_details(&self, region: Region, sku: &str) -> Result<CatalogResponse>;

    /// Fetches full product detail by product id.
    async fn product(&self, region: Region, product_id: &str) -> Result<CatalogResponse>;
}

/// Catalog HTTP client with browser impersonation.
pub struct CatalogClient {
    client: Client,
    base_url: Option<String>,
}

impl CatalogClient {
    /// Creates a new catalog client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new catalog client with an optional custom base URL (for testing).
    ///
    /// The override replaces every region's API domain.
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    /// Returns the API root for a region (custom for testing, or the region's domain).
    fn api_root(&self, region: Region) -> String {
        let base = self.base_url.as_deref().unwrap_or(region.api_base_domain());
        format!("{}/api/{}", base.trim_end_matches('/'), region.locale_id())
    }

    /// Builds the SKU resolution URL.
    pub fn sku_url(&self, region: Region, sku: &str) -> String {
        format!(
            "{}/catalog/sku/{}/persodetails",
            self.api_root(region),
            urlencoding::encode(sku)
        )
    }

    /// Builds the product detail URL.
    pub fn product_url(&self, region: Region, product_id: &str) -> String {
        format!("{}/catalog/product/{}", self.api_root(region), urlencoding::encode(product_id))
    }

    async fn get(&self, region: Region, url: &str) -> Result<CatalogResponse> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", region.accept_language())
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        if status == 403 || status == 429 || status == 503 {
            warn!(
                "Possibly rate limited ({}). Consider increasing the delays or using a proxy.",
                status
            );
        }

        let body = response.text().await.context("Failed to read response body")?;
        Ok(CatalogResponse { status, body })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn sku_details(&self, region: Region, sku: &str) -> Result<CatalogResponse> {
        let url = self.sku_url(region, sku);
        self.get(region, &url).await
    }

    async fn product(&self, region: Region, product_id: &str) -> Result<CatalogResponse> {
        let url = self.product_url(region, product_id);
        self.get(region, &url).await
    }
}

//! Fetch command: walks regions and SKUs, then exports the result.

use crate::catalog::{fetch_product, CatalogApi, CatalogClient, FetchOutcome, Region, RunResult};
use crate::config::Config;
use crate::error::ConfigError;
use crate::export::{self, ExportReport};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Final state of a run: gathered data plus what the exporter did with it.
#[derive(Debug)]
pub struct FetchSummary {
    pub result: RunResult,
    pub report: ExportReport,
}

/// Executes a multi-region product fetch.
pub struct FetchCommand {
    config: Config,
    regions: Vec<Region>,
    skus: Vec<String>,
}

impl FetchCommand {
    /// Validates the configuration. Nothing touches the network until this succeeds.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let regions = crate::catalog::regions::resolve(&config.regions)?;

        let skus: Vec<String> = config
            .skus
            .iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if skus.is_empty() {
            return Err(ConfigError::EmptySkus);
        }

        Ok(Self { config, regions, skus })
    }

    /// Runs the fetch against the live API and exports the result.
    pub async fn execute(&self) -> Result<FetchSummary> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, Utc::now()).await
    }

    /// Runs with a provided client and start time (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl CatalogApi,
        started: DateTime<Utc>,
    ) -> Result<FetchSummary> {
        let result = self.collect(client, started).await?;

        info!(
            "Fetched {} items with {} lookup errors; exporting as {}",
            result.items.len(),
            result.errors.len(),
            self.config.export
        );
        let report = export::export(&result, self.config.export, &self.config.output_dir);

        Ok(FetchSummary { result, report })
    }

    /// Looks up every SKU in every region, region-major, in the order given.
    ///
    /// The first network or parse failure aborts the whole run.
    pub async fn collect(
        &self,
        client: &impl CatalogApi,
        started: DateTime<Utc>,
    ) -> Result<RunResult> {
        let mut result = RunResult::new(&self.regions, started);
        let fetch_time = result.record_time();

        for (r, &region) in self.regions.iter().enumerate() {
            for (s, sku) in self.skus.iter().enumerate() {
                // Crossing into a new region waits out the SKU pause as well.
                if s > 0 {
                    self.pause(self.config.sku_delay_ms).await;
                } else if r > 0 {
                    self.pause(self.config.sku_delay_ms + self.config.region_delay_ms).await;
                }

                let outcome = fetch_product(client, region, sku, &fetch_time)
                    .await
                    .with_context(|| format!("Lookup of {} in {} failed", sku, region))?;

                if let FetchOutcome::Found(record) = &outcome {
                    info!(
                        "{} [{}] {} {} {}",
                        record.sku, region, record.name, record.price, record.currency
                    );
                }
                result.record(outcome);
            }
        }

        Ok(result)
    }

    /// Sleeps for `base_ms` plus random jitter. Zero skips the pause.
    async fn pause(&self, base_ms: u64) {
        if base_ms == 0 {
            return;
        }

        let jitter = if self.config.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.config.delay_jitter_ms)
        } else {
            0
        };

        let total = base_ms + jitter;
        debug!("Pausing {}ms", total);
        tokio::time::sleep(Duration::from_millis(total)).await;
    }
}

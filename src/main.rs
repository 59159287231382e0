//! lv-crawler - Louis Vuitton catalog fetcher
//!
//! Looks up SKUs across regional storefronts and exports the results.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lv_crawler::catalog::Region;
use lv_crawler::commands::FetchCommand;
use lv_crawler::config::{split_list, Config};
use lv_crawler::export::{ExportMode, ExportOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lv-crawler",
    version,
    about = "Fetch Louis Vuitton product metadata across regions",
    long_about = "Resolves SKUs against the public catalog API of each requested storefront \
                  and exports name, price, currency, description, images and color to JSON and/or XLSX."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "LV_PROXY")]
    proxy: Option<String>,

    /// Pause after each SKU in milliseconds
    #[arg(long, global = true)]
    sku_delay: Option<u64>,

    /// Pause after each region in milliseconds
    #[arg(long, global = true)]
    region_delay: Option<u64>,

    /// Directory for export files
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch products and export them
    #[command(alias = "f")]
    Fetch {
        /// Region codes, comma-separated (e.g. uk,us,jp)
        #[arg(short, long)]
        regions: Option<String>,

        /// SKUs, comma-separated
        #[arg(short, long)]
        skus: Option<String>,

        /// Export format: json, xlsx or both
        #[arg(short, long)]
        export: Option<ExportMode>,
    },

    /// List supported regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mut config = Config::load(cli.config.as_deref())?.with_env()?;

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.sku_delay {
        config.sku_delay_ms = delay;
    }
    if let Some(delay) = cli.region_delay {
        config.region_delay_ms = delay;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    match cli.command {
        Commands::Fetch { regions, skus, export } => {
            if let Some(regions) = regions {
                config.regions = split_list(&regions);
            }
            if let Some(skus) = skus {
                config.skus = split_list(&skus);
            }
            if let Some(export) = export {
                config.export = export;
            }

            let cmd = FetchCommand::new(config)?;
            let summary = cmd.execute().await?;

            for item in &summary.result.items {
                println!(
                    "{:<10} {:<4} {:<12} {:>10} {:<4} {}",
                    item.sku, item.region, item.product_id, item.price, item.currency, item.name
                );
            }
            for error in &summary.result.errors {
                println!("{:<10} {:<4} no data", error.sku, error.region);
            }
            println!();

            for (format, outcome) in &summary.report.entries {
                match outcome {
                    Ok(ExportOutcome::Written(path)) => {
                        println!("{}: wrote {}", format.extension(), path.display())
                    }
                    Ok(ExportOutcome::ErrorsOnly) => {
                        println!("{}: errors only, nothing to export", format.extension())
                    }
                    Ok(ExportOutcome::NoData) => println!("{}: no data", format.extension()),
                    Err(e) => eprintln!("{}: export failed: {:#}", format.extension(), e),
                }
            }

            if summary.report.has_failures() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Regions => {
            println!("Supported regions:\n");
            println!("{:<6} {:<8} {:<30}", "Code", "Locale", "API domain");
            println!("{:-<6} {:-<8} {:-<30}", "", "", "");

            for region in Region::all() {
                println!(
                    "{:<6} {:<8} {:<30}",
                    region.code(),
                    region.locale_id(),
                    region.api_base_domain()
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

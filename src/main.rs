use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod error;
mod inventory;
mod provider;
mod report;
mod versions;

use cli::Cli;
use error::{InventoryError, Result as InventoryResult};
use provider::{CacheProvider, ElastiCacheProvider};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        error!("inventory run failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "elastic_cluster_info=warn",
            1 => "elastic_cluster_info=info",
            2 => "elastic_cluster_info=debug",
            _ => "elastic_cluster_info=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .compact(),
        )
        .init();
}

async fn run(cli: &Cli) -> InventoryResult<()> {
    let start = std::time::Instant::now();

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(profile) = &cli.profile {
        debug!(profile = %profile, "loading shared AWS config for named profile");
        loader = loader.profile_name(profile);
    } else {
        debug!("loading shared AWS config for the default profile");
    }
    let config = loader.load().await;
    let region = config
        .region()
        .map(|r| r.to_string())
        .ok_or_else(|| {
            InventoryError::Config(
                "no AWS region configured; set one in ~/.aws/config or AWS_REGION".to_string(),
            )
        })?;
    info!(region = %region, "starting ElastiCache inventory");

    let provider = ElastiCacheProvider::new(aws_sdk_elasticache::Client::new(&config));
    let path = PathBuf::from(format!("{region}.csv"));
    run_pipeline(&provider, &path).await?;

    info!(duration = ?start.elapsed(), "inventory completed");
    Ok(())
}

/// The two sequential phases: version oracle first, then the inventory scan
/// feeding the CSV report.
async fn run_pipeline<P: CacheProvider>(
    provider: &P,
    path: &std::path::Path,
) -> InventoryResult<()> {
    let latest = versions::scan_latest_versions(provider).await?;
    let records = inventory::collect_inventory(provider, &latest).await?;
    report::write_report_file(path, &records)
}

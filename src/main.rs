use anyhow::Context;
use tfjs_fetcher_lib::downloads::{build_client, fetch_all};
use tfjs_fetcher_lib::FetcherConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default `info` level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = FetcherConfig::load().context("Failed to load configuration")?;
    tracing::info!(
        "Fetching {} model(s) into {}",
        config.sources.len(),
        config.base_dir.display()
    );

    let client = build_client(config.timeout_secs)?;
    fetch_all(&client, &config, None)
        .await
        .context("Model fetch aborted")?;

    Ok(())
}

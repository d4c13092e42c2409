/**
 * Model Fetcher
 *
 * Downloads every configured model source in order. Each source is a
 * remote folder containing `model.json` plus the shard files it lists.
 * The first failure stops the run.
 */

use std::path::PathBuf;

use reqwest::Client;

use super::downloader::{download_file, ProgressCallback};
use super::manifest::parse_manifest;
use crate::config::{FetcherConfig, ModelSource};
use crate::error::Result;
use crate::paths::{self, MANIFEST_FILE_NAME};

/// Download one model: its manifest, then every shard the manifest lists.
///
/// Returns the local model folder. Existing files are overwritten.
pub async fn download_model(
    client: &Client,
    config: &FetcherConfig,
    source: &ModelSource,
    progress_callback: Option<&ProgressCallback<'_>>,
) -> Result<PathBuf> {
    let target_folder = config.target_folder(source);
    paths::ensure_dir_exists(&target_folder)?;

    let manifest_path = paths::local_target(&target_folder, MANIFEST_FILE_NAME);
    let manifest_url = paths::remote_target(&source.remote_base_url, MANIFEST_FILE_NAME);
    download_file(
        client,
        &manifest_url,
        &manifest_path,
        config.chunk_size,
        progress_callback,
    )
    .await?;

    let shards = parse_manifest(&manifest_path).await?;
    tracing::info!(
        "[ModelFetcher] {} lists {} shard(s)",
        manifest_path.display(),
        shards.len()
    );

    for shard in &shards {
        let shard_path = paths::local_target(&target_folder, shard);
        // Nested shard names need their own subfolder.
        if let Some(parent) = shard_path.parent() {
            paths::ensure_dir_exists(parent)?;
        }
        let shard_url = paths::remote_target(&source.remote_base_url, shard);
        download_file(
            client,
            &shard_url,
            &shard_path,
            config.chunk_size,
            progress_callback,
        )
        .await?;
    }

    Ok(target_folder)
}

/// Download every source in `config`, sequentially and in list order.
pub async fn fetch_all(
    client: &Client,
    config: &FetcherConfig,
    progress_callback: Option<&ProgressCallback<'_>>,
) -> Result<()> {
    for source in &config.sources {
        tracing::info!("[ModelFetcher] Begin {}", source.remote_base_url);
        let folder = download_model(client, config, source, progress_callback).await?;
        tracing::info!("[ModelFetcher] End {} -> {}", source.remote_base_url, folder.display());
    }

    tracing::info!("[ModelFetcher] Fetched {} model(s)", config.sources.len());
    Ok(())
}

/**
 * Downloader
 *
 * Single-file HTTP download with progress reporting.
 * Used by the model fetcher for manifests and shards alike.
 */

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{FetchError, Result};

/// Download progress information
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    pub downloaded: u64,
    /// `None` when the server sent no Content-Length.
    pub total: Option<u64>,
    pub percent: Option<f64>,
    pub speed_mbps: f64,
}

/// Progress callback invoked while a body is streamed to disk.
/// May borrow from the caller for `'a`.
pub type ProgressCallback<'a> = dyn Fn(DownloadProgress) + Send + Sync + 'a;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Create the HTTP client shared by every download of a run
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(FetchError::Client)
}

/// Download `url` into `dest`, overwriting any existing file.
///
/// The response status is checked before `dest` is touched. The body is
/// written through a buffer of `chunk_size` bytes. The parent directory
/// must already exist.
pub async fn download_file(
    client: &Client,
    url: &str,
    dest: &Path,
    chunk_size: usize,
    progress_callback: Option<&ProgressCallback<'_>>,
) -> Result<PathBuf> {
    tracing::info!("[Downloader] Downloading {} -> {}", url, dest.display());

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::network(url, e))?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let total_size = response.content_length();

    let file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| FetchError::filesystem(dest, e))?;
    let mut writer = BufWriter::with_capacity(chunk_size, file);

    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;
    let start_time = Instant::now();
    let mut last_progress_time = start_time;

    while let Some(item) = stream.next().await {
        let chunk = item.map_err(|e| FetchError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| FetchError::filesystem(dest, e))?;

        downloaded += chunk.len() as u64;

        let now = Instant::now();
        if now.duration_since(last_progress_time) >= PROGRESS_INTERVAL
            || Some(downloaded) == total_size
        {
            last_progress_time = now;
            let progress = progress_at(downloaded, total_size, start_time.elapsed());

            tracing::debug!(
                "[Downloader] {}: {} bytes ({:.2} MB/s)",
                dest.display(),
                progress.downloaded,
                progress.speed_mbps
            );

            if let Some(callback) = progress_callback {
                callback(progress);
            }
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| FetchError::filesystem(dest, e))?;

    tracing::info!(
        "[Downloader] Done: {} ({} bytes)",
        dest.display(),
        downloaded
    );
    Ok(dest.to_path_buf())
}

fn progress_at(downloaded: u64, total: Option<u64>, elapsed: Duration) -> DownloadProgress {
    let elapsed = elapsed.as_secs_f64();
    let speed_mbps = if elapsed > 0.0 {
        (downloaded as f64 / elapsed) / 1_000_000.0
    } else {
        0.0
    };

    let percent = total
        .filter(|&t| t > 0)
        .map(|t| (downloaded as f64 / t as f64) * 100.0);

    DownloadProgress {
        downloaded,
        total,
        percent,
        speed_mbps,
    }
}

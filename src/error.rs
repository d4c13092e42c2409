/**
 * Error types for model fetching.
 */
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching model artifacts.
///
/// Every variant aborts the run; nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body stream broke.
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Download of {url} failed: HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// A directory or file could not be created, written or read.
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or lacks `weightsManifest` / `paths`.
    #[error("Invalid manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A shard path would resolve outside the model folder.
    #[error("Manifest {} references unsafe shard path '{shard}'", .path.display())]
    UnsafeShardPath { path: PathBuf, shard: String },

    /// The configuration file could not be loaded.
    #[error("Invalid configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl FetchError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            source,
        }
    }
}

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

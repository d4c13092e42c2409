/**
 * tfjs-model-fetcher
 *
 * Downloads TensorFlow.js model artifacts (weight manifests and binary
 * shard files) from remote storage into per-model local folders.
 */
pub mod config;
pub mod downloads;
pub mod error;
pub mod paths;

pub use crate::config::{FetcherConfig, ModelSource};
pub use crate::downloads::{download_model, fetch_all};
pub use crate::error::{FetchError, Result};

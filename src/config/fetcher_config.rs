/**
 * Fetcher Configuration
 *
 * Default sources are the four MobileNet v1 (224px) variants published in
 * the public tfjs-models bucket. A TOML file can replace any field.
 */
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FetchError, Result};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "TFJS_FETCHER_CONFIG";

/// Configuration file picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "tfjs-fetcher.toml";

/// Default request timeout (30 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 1800;

/// Default write-buffer size for streamed bodies.
pub const DEFAULT_CHUNK_SIZE: usize = 512 * 1024;

const MOBILENET_BUCKET: &str = "https://storage.googleapis.com/tfjs-models/tfjs";

const MOBILENET_VARIANTS: [&str; 4] = [
    "mobilenet_v1_0.25_224",
    "mobilenet_v1_0.50_224",
    "mobilenet_v1_0.75_224",
    "mobilenet_v1_1.0_224",
];

/// One downloadable model variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelSource {
    /// Remote folder holding `model.json` and its shards, without trailing file name.
    pub remote_base_url: String,
    /// Local folder, relative to [`FetcherConfig::base_dir`].
    pub local_folder: PathBuf,
}

impl ModelSource {
    pub fn new(remote_base_url: impl Into<String>, local_folder: impl Into<PathBuf>) -> Self {
        Self {
            remote_base_url: remote_base_url.into(),
            local_folder: local_folder.into(),
        }
    }
}

/// Immutable settings for one fetch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub base_dir: PathBuf,
    pub sources: Vec<ModelSource>,
    pub timeout_secs: u64,
    pub chunk_size: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            sources: default_sources(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// The four MobileNet v1 sources, each stored under `mobilenet/<variant>`.
pub fn default_sources() -> Vec<ModelSource> {
    MOBILENET_VARIANTS
        .iter()
        .map(|variant| {
            ModelSource::new(
                format!("{}/{}", MOBILENET_BUCKET, variant),
                Path::new("mobilenet").join(variant),
            )
        })
        .collect()
}

/// On-disk shape of the configuration file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_dir: Option<PathBuf>,
    sources: Option<Vec<ModelSource>>,
    timeout_secs: Option<u64>,
    chunk_size: Option<usize>,
}

impl FetcherConfig {
    /// Parse a configuration from TOML text, filling unset fields with defaults.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| FetchError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        if file.sources.is_none() {
            tracing::warn!(
                "[Config] {} sets no sources, using the default MobileNet set",
                origin.display()
            );
        }

        let defaults = Self::default();
        let config = Self {
            base_dir: file.base_dir.unwrap_or(defaults.base_dir),
            sources: file.sources.unwrap_or(defaults.sources),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
            chunk_size: file.chunk_size.unwrap_or(defaults.chunk_size),
        };
        config.validate(origin)?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| FetchError::filesystem(path, e))?;
        Self::from_toml_str(&contents, path)
    }

    /// Resolve the run configuration:
    /// `$TFJS_FETCHER_CONFIG` > `./tfjs-fetcher.toml` > defaults.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_from(explicit.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// `explicit` must exist when given; `local` is only read if present.
    fn load_from(explicit: Option<&Path>, local: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::info!("[Config] Loading {}", path.display());
            return Self::from_file(path);
        }

        if local.exists() {
            tracing::info!("[Config] Loading {}", local.display());
            return Self::from_file(local);
        }

        Ok(Self::default())
    }

    /// Local folder for a source, resolved against `base_dir`.
    pub fn target_folder(&self, source: &ModelSource) -> PathBuf {
        self.base_dir.join(&source.local_folder)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        let invalid = |message: &str| FetchError::Config {
            path: origin.to_path_buf(),
            message: message.to_string(),
        };

        if self.timeout_secs == 0 {
            return Err(invalid("timeout_secs must be greater than zero"));
        }
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size must be greater than zero"));
        }
        if self.sources.iter().any(|s| s.remote_base_url.trim().is_empty()) {
            return Err(invalid("every source needs a remote_base_url"));
        }
        Ok(())
    }
}

/**
 * Target Paths
 *
 * Local layout:  {base_dir}/{local_folder}/{file}
 * Remote layout: {remote_base_url}/{file}
 */
use std::path::{Component, Path, PathBuf};

use crate::error::{FetchError, Result};

/// File name of the weights manifest inside every model folder.
pub const MANIFEST_FILE_NAME: &str = "model.json";

/// Get the remote URL of a file under a model's base URL
///
/// Returns: {remote_base}/{file_name}
pub fn remote_target(remote_base: &str, file_name: &str) -> String {
    format!("{}/{}", remote_base.trim_end_matches('/'), file_name)
}

/// Get the local path of a file inside a model folder
///
/// Returns: {folder}/{file_name}
pub fn local_target(folder: &Path, file_name: &str) -> PathBuf {
    folder.join(file_name)
}

/// Whether a manifest-relative path stays inside its model folder.
///
/// Accepts nested names such as `group1/shard1of2`. Rejects absolute paths,
/// any `..` component, and names with no file component (`""`, `.`, `./`).
pub fn is_contained_relative(file_name: &str) -> bool {
    let mut has_file_component = false;
    for component in Path::new(file_name).components() {
        match component {
            Component::Normal(_) => has_file_component = true,
            Component::CurDir => {}
            _ => return false,
        }
    }
    has_file_component
}

/// Ensure a directory exists, creating it and its parents if necessary
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| FetchError::filesystem(path, e))?;
        tracing::debug!("[Paths] Created {}", path.display());
    }
    Ok(())
}

/**
 * Weight Manifests
 *
 * Reads the shard file names out of `model.json`; topology and
 * per-weight specs are ignored.
 */
use std::path::Path;

use serde::Deserialize;

use crate::error::{FetchError, Result};
use crate::paths;

/// The part of a TensorFlow.js `model.json` that lists weight files.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelManifest {
    #[serde(rename = "weightsManifest")]
    pub weights_manifest: Vec<WeightsGroup>,
}

/// One weight group and the shard files holding its data.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsGroup {
    pub paths: Vec<String>,
}

/// All shard paths across all groups, in manifest order, duplicates kept.
pub fn flatten_shard_paths(manifest: &ModelManifest) -> Vec<String> {
    manifest
        .weights_manifest
        .iter()
        .flat_map(|group| group.paths.iter().cloned())
        .collect()
}

/// Parse manifest text read from `origin` into its shard list.
pub fn parse_manifest_str(contents: &str, origin: &Path) -> Result<Vec<String>> {
    let manifest: ModelManifest =
        serde_json::from_str(contents).map_err(|e| FetchError::Parse {
            path: origin.to_path_buf(),
            source: e,
        })?;

    for (index, group) in manifest.weights_manifest.iter().enumerate() {
        tracing::info!("[Manifest] group {} paths: {:?}", index, group.paths);
    }

    let shards = flatten_shard_paths(&manifest);
    if let Some(bad) = shards.iter().find(|s| !paths::is_contained_relative(s)) {
        return Err(FetchError::UnsafeShardPath {
            path: origin.to_path_buf(),
            shard: bad.clone(),
        });
    }

    Ok(shards)
}

/// Read a downloaded manifest and return its shard list.
pub async fn parse_manifest(path: &Path) -> Result<Vec<String>> {
    tracing::info!("[Manifest] Parsing {}", path.display());

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FetchError::filesystem(path, e))?;

    parse_manifest_str(&contents, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> &'static Path {
        Path::new("model.json")
    }

    #[test]
    fn test_flatten_preserves_order_and_duplicates() {
        let json = r#"{
            "weightsManifest": [
                {"paths": ["group1-shard1of2", "group1-shard2of2"]},
                {"paths": []},
                {"paths": ["group2-shard1of1", "group1-shard1of2"]}
            ]
        }"#;
        let shards = parse_manifest_str(json, origin()).unwrap();
        assert_eq!(
            shards,
            vec![
                "group1-shard1of2",
                "group1-shard2of2",
                "group2-shard1of1",
                "group1-shard1of2",
            ]
        );
    }

    #[test]
    fn test_ignores_other_fields() {
        let json = r#"{
            "modelTopology": {"class_name": "Model"},
            "format": "layers-model",
            "weightsManifest": [
                {"paths": ["group1-shard1of1"], "weights": [{"name": "conv1/kernel", "shape": [3, 3, 3, 8], "dtype": "float32"}]}
            ]
        }"#;
        assert_eq!(
            parse_manifest_str(json, origin()).unwrap(),
            vec!["group1-shard1of1"]
        );
    }

    #[test]
    fn test_empty_manifest_has_no_shards() {
        let shards = parse_manifest_str(r#"{"weightsManifest": []}"#, origin()).unwrap();
        assert!(shards.is_empty());
    }

    #[test]
    fn test_missing_weights_manifest() {
        let result = parse_manifest_str(r#"{"modelTopology": {}}"#, origin());
        assert!(matches!(result, Err(FetchError::Parse { .. })));
    }

    #[test]
    fn test_missing_paths() {
        let result = parse_manifest_str(r#"{"weightsManifest": [{"weights": []}]}"#, origin());
        assert!(matches!(result, Err(FetchError::Parse { .. })));
    }

    #[test]
    fn test_not_json() {
        let result = parse_manifest_str("<html>NoSuchKey</html>", origin());
        assert!(matches!(result, Err(FetchError::Parse { .. })));
    }

    #[test]
    fn test_rejects_escaping_shard() {
        let json = r#"{"weightsManifest": [{"paths": ["ok.bin", "../../evil.bin"]}]}"#;
        match parse_manifest_str(json, origin()) {
            Err(FetchError::UnsafeShardPath { shard, .. }) => assert_eq!(shard, "../../evil.bin"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_folder_as_shard() {
        let json = r#"{"weightsManifest": [{"paths": ["a.bin", "."]}]}"#;
        match parse_manifest_str(json, origin()) {
            Err(FetchError::UnsafeShardPath { shard, .. }) => assert_eq!(shard, "."),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_manifest_from_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("model.json");
        std::fs::write(&path, r#"{"weightsManifest":[{"paths":["a.bin","b.bin"]}]}"#).unwrap();

        assert_eq!(parse_manifest(&path).await.unwrap(), vec!["a.bin", "b.bin"]);
    }

    #[tokio::test]
    async fn test_parse_manifest_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let result = parse_manifest(&temp.path().join("model.json")).await;
        assert!(matches!(result, Err(FetchError::Filesystem { .. })));
    }
}

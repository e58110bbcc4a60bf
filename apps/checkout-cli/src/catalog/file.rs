//! Reads the catalog from a JSON file on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{CatalogError, CatalogProvider, CatalogResult, ProductRecord};

/// Provider backed by a JSON array of product records.
///
/// ## File Format
/// ```json
/// [
///   { "id": 1, "name": "Laptop", "availableCount": 3, "price": 1249.00 }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileProvider { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for JsonFileProvider {
    async fn get_products(&self) -> CatalogResult<Vec<ProductRecord>> {
        debug!(path = ?self.path, "Reading catalog file");

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(serde_json::from_str(&contents)?)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_records_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 2, "name": "B", "availableCount": 3, "price": 30},
                {"id": 1, "name": "A", "availableCount": 5, "price": 50}
            ]"#,
        )
        .unwrap();

        let records = JsonFileProvider::new(&path).get_products().await.unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileProvider::new(dir.path().join("nope.json"))
            .get_products()
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("nope.json"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileProvider::new(&path).get_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(!err.is_retryable());
    }
}

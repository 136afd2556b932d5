//! Filesystem adapters for extsmith.
//!
//! Implements the `BundleStore` port from extsmith-core on the local
//! disk. All operations go through `tokio::fs` for async I/O.

use std::path::{Path, PathBuf};

use extsmith_core::bundle::store::BundleStore;
use extsmith_types::error::GenerateError;

/// Resolve the data directory for the service.
///
/// `EXTSMITH_DATA_DIR` overrides; otherwise `~/.extsmith`, with the
/// current directory as a last resort.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("EXTSMITH_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".extsmith");
    }

    PathBuf::from(".extsmith")
}

/// Local-disk bundle store rooted at the output directory.
pub struct LocalBundleStore {
    root: PathBuf,
}

impl LocalBundleStore {
    /// Create a store rooted at `root`. The directory is created lazily
    /// on first write.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    fn storage_err(err: std::io::Error) -> GenerateError {
        GenerateError::Storage(err.to_string())
    }
}

impl BundleStore for LocalBundleStore {
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), GenerateError> {
        let full = self.full(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(Self::storage_err)?;
        }
        tokio::fs::write(&full, data).await.map_err(Self::storage_err)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, GenerateError> {
        tokio::fs::read(self.full(path))
            .await
            .map_err(Self::storage_err)
    }

    async fn remove_dir(&self, path: &Path) -> Result<(), GenerateError> {
        match tokio::fs::remove_dir_all(self.full(path)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::storage_err(err)),
        }
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, GenerateError> {
        let base = self.full(path);
        let mut files = Vec::new();
        let mut pending = vec![base.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(Self::storage_err(err)),
            };

            while let Some(entry) = entries.next_entry().await.map_err(Self::storage_err)? {
                let entry_path = entry.path();
                let file_type = entry.file_type().await.map_err(Self::storage_err)?;
                if file_type.is_dir() {
                    pending.push(entry_path);
                } else if let Ok(relative) = entry_path.strip_prefix(&base) {
                    files.push(relative.to_path_buf());
                }
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_read_roundtrip() {
        let tmp = tempdir().unwrap();
        let store = LocalBundleStore::new(tmp.path().to_path_buf());

        store
            .write_file(Path::new("ext/manifest.json"), b"{}")
            .await
            .unwrap();
        let data = store.read_file(Path::new("ext/manifest.json")).await.unwrap();
        assert_eq!(data, b"{}");
    }

    #[tokio::test]
    async fn test_list_dir_recursive_relative_paths() {
        let tmp = tempdir().unwrap();
        let store = LocalBundleStore::new(tmp.path().to_path_buf());

        store.write_file(Path::new("ext/a.js"), b"a").await.unwrap();
        store
            .write_file(Path::new("ext/nested/b.js"), b"b")
            .await
            .unwrap();

        let mut listed = store.list_dir(Path::new("ext")).await.unwrap();
        listed.sort();
        assert_eq!(
            listed,
            vec![PathBuf::from("a.js"), PathBuf::from("nested/b.js")]
        );
    }

    #[tokio::test]
    async fn test_list_absent_dir_is_empty() {
        let tmp = tempdir().unwrap();
        let store = LocalBundleStore::new(tmp.path().to_path_buf());
        assert!(store.list_dir(Path::new("missing")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_dir_is_idempotent() {
        let tmp = tempdir().unwrap();
        let store = LocalBundleStore::new(tmp.path().to_path_buf());

        store.write_file(Path::new("ext/a.js"), b"a").await.unwrap();
        store.remove_dir(Path::new("ext")).await.unwrap();
        assert!(store.read_file(Path::new("ext/a.js")).await.is_err());

        // Removing again is not an error.
        store.remove_dir(Path::new("ext")).await.unwrap();
    }
}

//! Storage port for the bundle generator.
//!
//! The generator performs every filesystem touch through this narrow
//! trait, so it can be exercised against an in-memory fake. All paths
//! are relative to the store's output root. Uses RPITIT (native async
//! fn in traits, Rust 2024 edition); the local-disk implementation
//! lives in extsmith-infra.

use std::path::{Path, PathBuf};

use extsmith_types::error::GenerateError;

/// Narrow filesystem interface the bundle generator is generic over.
pub trait BundleStore: Send + Sync {
    /// Write a file, creating parent directories as needed.
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<(), GenerateError>> + Send;

    /// Read a file's full contents.
    fn read_file(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, GenerateError>> + Send;

    /// Remove a directory and everything under it. Absent is not an error.
    fn remove_dir(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<(), GenerateError>> + Send;

    /// List every file under a directory, recursively, as paths
    /// relative to that directory. An absent directory lists empty.
    fn list_dir(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>, GenerateError>> + Send;
}

/// In-memory store for generator tests.
#[cfg(test)]
pub mod memory {
    use super::*;

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// A `BundleStore` holding files in a map keyed by relative path.
    #[derive(Default)]
    pub struct MemoryStore {
        files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// All stored paths, sorted.
        pub fn paths(&self) -> Vec<PathBuf> {
            self.files.lock().unwrap().keys().cloned().collect()
        }

        /// Contents of a stored file, if present.
        pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(path.as_ref()).cloned()
        }
    }

    impl BundleStore for MemoryStore {
        async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), GenerateError> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }

        async fn read_file(&self, path: &Path) -> Result<Vec<u8>, GenerateError> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    GenerateError::Storage(format!("not found: {}", path.display()))
                })
        }

        async fn remove_dir(&self, path: &Path) -> Result<(), GenerateError> {
            self.files
                .lock()
                .unwrap()
                .retain(|p, _| !p.starts_with(path));
            Ok(())
        }

        async fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, GenerateError> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .keys()
                .filter_map(|p| p.strip_prefix(path).ok().map(|r| r.to_path_buf()))
                .collect())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_memory_store_roundtrip() {
            let store = MemoryStore::new();
            store
                .write_file(Path::new("dir/a.txt"), b"hello")
                .await
                .unwrap();
            assert_eq!(store.read_file(Path::new("dir/a.txt")).await.unwrap(), b"hello");

            let listed = store.list_dir(Path::new("dir")).await.unwrap();
            assert_eq!(listed, vec![PathBuf::from("a.txt")]);

            store.remove_dir(Path::new("dir")).await.unwrap();
            assert!(store.list_dir(Path::new("dir")).await.unwrap().is_empty());
        }
    }
}

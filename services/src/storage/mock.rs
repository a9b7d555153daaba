//! In-memory upload storage for testing.

use super::traits::UploadStorage;
use super::types::StorageError;
use bytes::Bytes;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

/// In-memory implementation of `UploadStorage`.
///
/// Names registered with [`MockUploadStorage::fail_on`] make `persist` fail,
/// which lets tests drive the save-error path.
#[derive(Clone, Default)]
pub struct MockUploadStorage {
    files: Arc<RwLock<BTreeMap<String, Bytes>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    unavailable: bool,
}

impl MockUploadStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage whose health check always fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Pre-populates a stored file, e.g. to force a name collision.
    pub fn insert(&self, name: impl Into<String>, content: impl Into<Bytes>) {
        self.files
            .write()
            .expect("lock poisoned")
            .insert(name.into(), content.into());
    }

    pub fn fail_on(&self, name: impl Into<String>) {
        self.failing
            .write()
            .expect("lock poisoned")
            .insert(name.into());
    }

    pub fn get(&self, name: &str) -> Option<Bytes> {
        self.files.read().expect("lock poisoned").get(name).cloned()
    }

    /// Stored names in lexical order.
    pub fn names(&self) -> Vec<String> {
        self.files.read().expect("lock poisoned").keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UploadStorage for MockUploadStorage {
    type Error = StorageError;

    async fn ensure_root(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool, Self::Error> {
        Ok(self.files.read().expect("lock poisoned").contains_key(name))
    }

    async fn persist(&self, name: &str, content: Bytes) -> Result<(), Self::Error> {
        if self.failing.read().expect("lock poisoned").contains(name) {
            return Err(StorageError::Injected(name.to_owned()));
        }
        self.insert(name, content);
        Ok(())
    }

    async fn is_available(&self) -> bool {
        !self.unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_persist_then_exists() {
        let storage = MockUploadStorage::new();
        assert!(storage.is_empty());

        storage
            .persist("a_1.png", Bytes::from_static(b"png"))
            .await
            .unwrap();

        assert!(storage.exists("a_1.png").await.unwrap());
        assert!(!storage.exists("b_1.png").await.unwrap());
        assert_eq!(storage.get("a_1.png").unwrap(), Bytes::from_static(b"png"));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_fail_on_rejects_persist() {
        let storage = MockUploadStorage::new();
        storage.fail_on("broken.pdf");

        let result = storage.persist("broken.pdf", Bytes::new()).await;

        assert!(matches!(result, Err(StorageError::Injected(name)) if name == "broken.pdf"));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_storage() {
        assert!(MockUploadStorage::new().is_available().await);
        assert!(!MockUploadStorage::unavailable().is_available().await);
    }
}

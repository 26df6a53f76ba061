use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::internal::StorageError;

/// Byte-addressable file storage keyed by generated filename
///
/// One flat namespace; no rename, no listing.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Write a new file. Never overwrites an existing key.
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    async fn exists(&self, key: &str) -> Result<bool, StorageError>;
}

/// Reject anything that is not a plain file name
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".to_string()));
    }
    if key.contains("..") || key.contains('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "'{}' contains path separators or '..'",
            key
        )));
    }
    if key.starts_with('.') {
        return Err(StorageError::InvalidKey(format!("'{}' starts with '.'", key)));
    }
    if key.len() > 255 {
        return Err(StorageError::InvalidKey("key too long (max 255 characters)".to_string()));
    }
    Ok(())
}

/// ContentStore backed by a single local directory
#[derive(Debug, Clone)]
pub struct LocalContentStore {
    root: PathBuf,
}

impl LocalContentStore {
    /// Open the content directory, creating it if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| StorageError::io("create_dir", &root.display().to_string(), e))?;

        tracing::debug!("Content directory ready at {}", root.display());

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| StorageError::io("create", key, e))?;

        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            // Partial file must not survive a failed write
            let _ = fs::remove_file(&path).await;
            return Err(StorageError::io("write", key, e));
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::io("delete", key, e))
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io("stat", key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b.png").is_err());
        assert!(validate_key("a\\b.png").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("").is_err());
        assert!(validate_key(&"x".repeat(256)).is_err());
        assert!(validate_key("coverImage-1700000000000-42.png").is_ok());
    }

    #[tokio::test]
    async fn test_open_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("uploads");

        let store = LocalContentStore::open(&root).await.unwrap();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn test_write_exists_delete() {
        let dir = TempDir::new().unwrap();
        let store = LocalContentStore::open(dir.path()).await.unwrap();

        store.write("a.png", b"png-bytes").await.unwrap();
        assert!(store.exists("a.png").await.unwrap());
        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), b"png-bytes");

        store.delete("a.png").await.unwrap();
        assert!(!store.exists("a.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_write_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = LocalContentStore::open(dir.path()).await.unwrap();

        store.write("a.png", b"first").await.unwrap();
        let second = store.write("a.png", b"second").await;

        assert!(matches!(second, Err(StorageError::Io { .. })));
        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = LocalContentStore::open(dir.path()).await.unwrap();

        assert!(store.delete("missing.png").await.is_err());
    }
}

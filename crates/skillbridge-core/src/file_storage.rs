//! File storage abstraction for uploaded payment receipts.
//!
//! Business logic talks to the [`FileStorage`] trait so that the local-disk
//! backend can be swapped for an object store without touching handlers.
//!
//! # Example
//!
//! ```ignore
//! use skillbridge_core::file_storage::{FileStorage, LocalFileStorage, ReceiptKind};
//! use std::path::PathBuf;
//!
//! let storage = LocalFileStorage::new(
//!     PathBuf::from("./uploads"),
//!     "http://localhost:3000/uploads".to_string(),
//!     5 * 1024 * 1024,
//! );
//!
//! let kind = ReceiptKind::detect("application/pdf", &bytes)?;
//! let key = storage.save(&kind.receipt_key(), &bytes).await?;
//! let url = storage.get_url(&key)?;
//! ```

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Storage backend for uploaded files.
pub trait FileStorage: Send + Sync {
    /// Persist `content` under `key` and return the key that was written.
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String>;

    /// Public URL at which the stored file can be fetched.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;

    /// Largest accepted upload in bytes.
    fn max_file_size(&self) -> usize;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File exceeds maximum size of {max_bytes} bytes")]
    InvalidFileSize { max_bytes: usize },

    #[error("Invalid file type '{received}'. Allowed types: {}", allowed.join(", "))]
    InvalidMimeType {
        received: String,
        allowed: Vec<String>,
    },

    #[error("File content does not match declared content type")]
    ContentMismatch,

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether the failure was caused by the uploaded file rather than the backend.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Accepted receipt formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    Pdf,
    Jpeg,
    Png,
}

impl ReceiptKind {
    pub const ALLOWED_CONTENT_TYPES: [&'static str; 3] =
        ["application/pdf", "image/jpeg", "image/png"];

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/pdf" => Some(Self::Pdf),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Resolves the declared content type and checks it against the file's magic bytes.
    pub fn detect(content_type: &str, data: &[u8]) -> Result<Self, StorageError> {
        let kind = Self::from_content_type(content_type).ok_or_else(|| {
            StorageError::InvalidMimeType {
                received: content_type.to_string(),
                allowed: Self::ALLOWED_CONTENT_TYPES
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            }
        })?;

        if !kind.matches_magic_bytes(data) {
            return Err(StorageError::ContentMismatch);
        }

        Ok(kind)
    }

    pub fn matches_magic_bytes(&self, data: &[u8]) -> bool {
        match self {
            Self::Pdf => data.starts_with(b"%PDF"),
            Self::Jpeg => data.starts_with(&[0xFF, 0xD8, 0xFF]),
            Self::Png => data.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Fresh storage key of the form `receipts/receipt_<uuid>.<ext>`.
    pub fn receipt_key(&self) -> String {
        format!("receipts/receipt_{}.{}", Uuid::new_v4(), self.extension())
    }
}

/// Stores files under a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_file_size,
        }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Rejects empty keys, path traversal and anything outside `[A-Za-z0-9-_./]`.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.'))
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            let file_path = self.base_dir.join(key);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::write(&file_path, content).await?;
            tracing::debug!(key = %key, bytes = content.len(), "Stored file");

            Ok(key.to_string())
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url, key))
    }

    fn max_file_size(&self) -> usize {
        self.max_file_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage(max: usize) -> LocalFileStorage {
        let dir = std::env::temp_dir().join(format!("skillbridge-storage-{}", Uuid::new_v4()));
        LocalFileStorage::new(dir, "http://localhost:3000/uploads/".to_string(), max)
    }

    #[test]
    fn test_detect_accepts_matching_magic_bytes() {
        assert_eq!(
            ReceiptKind::detect("application/pdf", b"%PDF-1.7\n").unwrap(),
            ReceiptKind::Pdf
        );
        assert_eq!(
            ReceiptKind::detect("image/jpeg", &[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(),
            ReceiptKind::Jpeg
        );
        assert_eq!(
            ReceiptKind::detect("image/png", &[0x89, 0x50, 0x4E, 0x47, 0x0D]).unwrap(),
            ReceiptKind::Png
        );
    }

    #[test]
    fn test_detect_rejects_unknown_type() {
        let err = ReceiptKind::detect("image/gif", b"GIF89a").unwrap_err();
        assert!(matches!(err, StorageError::InvalidMimeType { .. }));
        assert!(err.to_string().contains("application/pdf"));
    }

    #[test]
    fn test_detect_rejects_spoofed_content() {
        let err = ReceiptKind::detect("application/pdf", &[0x89, 0x50, 0x4E, 0x47]).unwrap_err();
        assert!(matches!(err, StorageError::ContentMismatch));
        assert!(ReceiptKind::detect("image/png", &[]).is_err());
    }

    #[test]
    fn test_receipt_key_shape() {
        let key = ReceiptKind::Png.receipt_key();
        assert!(key.starts_with("receipts/receipt_"));
        assert!(key.ends_with(".png"));
        assert!(LocalFileStorage::validate_key(&key).is_ok());
    }

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(LocalFileStorage::validate_key("../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("/absolute").is_err());
        assert!(LocalFileStorage::validate_key("").is_err());
        assert!(LocalFileStorage::validate_key("receipts/a b.pdf").is_err());
    }

    #[test]
    fn test_get_url_joins_base() {
        let storage = temp_storage(10);
        assert_eq!(
            storage.get_url("receipts/x.pdf").unwrap(),
            "http://localhost:3000/uploads/receipts/x.pdf"
        );
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let storage = temp_storage(1024);
        let key = storage.save("receipts/test.pdf", b"%PDF-1.4").await.unwrap();
        assert_eq!(key, "receipts/test.pdf");

        let path = storage.base_dir().join(&key);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_save_rejects_oversized() {
        let storage = temp_storage(4);
        let err = storage.save("receipts/big.pdf", b"%PDF-1.4").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileSize { max_bytes: 4 }));
        assert!(err.is_client_error());
    }
}

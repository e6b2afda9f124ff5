//! Image upload storage
//!
//! Accepts binary blobs and writes them beneath the uploads directory with a
//! timestamp-prefixed, sanitized file name. The returned URL path is stable
//! and served by the HTTP layer under /uploads/.

use crate::error::{Error, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Blob store for uploaded images
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: u64,
}

impl UploadStore {
    /// Create a store writing into `dir`, rejecting blobs over `max_bytes`
    pub fn new(dir: PathBuf, max_bytes: u64) -> Self {
        Self { dir, max_bytes }
    }

    /// Directory the blobs are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a blob and return its public URL path
    pub fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(Error::Upload("Empty upload".to_string()));
        }
        if bytes.len() as u64 > self.max_bytes {
            return Err(Error::Upload(format!(
                "Upload of {} bytes exceeds the {} byte limit",
                bytes.len(),
                self.max_bytes
            )));
        }

        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );

        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::Upload(format!("Failed to create upload directory: {}", e)))?;

        let path = self.dir.join(&file_name);
        fs::write(&path, bytes)
            .map_err(|e| Error::Upload(format!("Failed to write upload: {}", e)))?;

        Ok(format!("/uploads/{}", file_name))
    }
}

/// Replace anything outside `[A-Za-z0-9._-]` with an underscore
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_file_name("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn test_store_writes_file_and_returns_url() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path().join("uploads"), 1024);

        let url = store.store("pier.jpg", b"imagedata").unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with("-pier.jpg"));

        let file_name = url.strip_prefix("/uploads/").unwrap();
        let on_disk = std::fs::read(store.dir().join(file_name)).unwrap();
        assert_eq!(on_disk, b"imagedata");
    }

    #[test]
    fn test_store_rejects_oversize() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path().join("uploads"), 4);

        let err = store.store("big.jpg", b"imagedata").unwrap_err();
        assert!(matches!(err, Error::Upload(_)));
    }

    #[test]
    fn test_store_rejects_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path().join("uploads"), 1024);
        assert!(store.store("x.jpg", b"").is_err());
    }
}

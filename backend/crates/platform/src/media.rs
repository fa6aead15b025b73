//! Media File Storage
//!
//! Stores uploaded profile photos and post images under a configured root
//! directory. Stored names are content-addressed: a SHA-256 prefix of the
//! file bytes joined with a sanitized form of the original name, so repeat
//! uploads of the same bytes land on the same path.
//!
//! The placeholder asset (`user_empty_photo.jpg`) is a named sentinel, not a
//! stored file owned by any profile; `remove` never touches it.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::crypto;

/// Default photo path for profiles without an uploaded photo
pub const PLACEHOLDER_PHOTO: &str = "user_empty_photo.jpg";

/// Hex characters of the content digest kept in stored names
const DIGEST_PREFIX_LEN: usize = 16;

/// Media storage errors
#[derive(Debug, Error)]
pub enum MediaError {
    /// Upload contained no bytes
    #[error("Uploaded file is empty")]
    EmptyUpload,

    /// Path escapes the media root or is otherwise malformed
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    /// Filesystem error
    #[error("Media I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An uploaded file as received from a multipart form
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Kind of stored media, mapped to a subdirectory of the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    ProfilePhoto,
    PostImage,
}

impl MediaKind {
    pub fn dir(&self) -> &'static str {
        match self {
            MediaKind::ProfilePhoto => "profile_photos",
            MediaKind::PostImage => "posts_images",
        }
    }
}

/// File store rooted at a configured directory
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Whether a stored path refers to the placeholder asset
    pub fn is_placeholder(path: &str) -> bool {
        path.contains("user_empty_photo")
    }

    /// Absolute path for a stored relative path
    pub fn absolute(&self, rel_path: &str) -> PathBuf {
        self.root.join(rel_path)
    }

    /// Store uploaded bytes, returning the relative path for the database
    pub async fn store(
        &self,
        kind: MediaKind,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::EmptyUpload);
        }

        let digest = crypto::to_hex(&crypto::sha256(bytes));
        let (stem, ext) = split_name(original_name);

        let rel_path = format!(
            "{}/{}_{}.{}",
            kind.dir(),
            &digest[..DIGEST_PREFIX_LEN],
            stem,
            ext
        );

        let dir = self.root.join(kind.dir());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(self.root.join(&rel_path), bytes).await?;

        Ok(rel_path)
    }

    /// Delete a stored file
    ///
    /// The placeholder is never deleted, and a file that is already gone is
    /// not an error. Paths that escape the media root are rejected.
    pub async fn remove(&self, rel_path: &str) -> Result<(), MediaError> {
        if Self::is_placeholder(rel_path) {
            return Ok(());
        }

        validate_relative(rel_path)?;

        match tokio::fs::remove_file(self.root.join(rel_path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reject absolute paths and parent-directory traversal
fn validate_relative(rel_path: &str) -> Result<(), MediaError> {
    let path = Path::new(rel_path);

    if path.is_absolute() {
        return Err(MediaError::InvalidPath(rel_path.to_string()));
    }

    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            _ => return Err(MediaError::InvalidPath(rel_path.to_string())),
        }
    }

    Ok(())
}

/// Sanitized (stem, extension) of an uploaded file name
fn split_name(original_name: &str) -> (String, String) {
    let name = Path::new(original_name);

    let stem: String = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();

    let stem = if stem.is_empty() {
        "upload".to_string()
    } else {
        stem
    };

    let ext: String = name
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("bin")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(8)
        .collect::<String>()
        .to_lowercase();

    let ext = if ext.is_empty() { "bin".to_string() } else { ext };

    (stem, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> MediaStore {
        let unique = crypto::to_hex(&crypto::random_bytes(8));
        MediaStore::new(std::env::temp_dir().join(format!("media_test_{}", unique)))
    }

    #[test]
    fn test_is_placeholder() {
        assert!(MediaStore::is_placeholder(PLACEHOLDER_PHOTO));
        assert!(MediaStore::is_placeholder("media/user_empty_photo.jpg"));
        assert!(!MediaStore::is_placeholder("profile_photos/abc_cat.jpg"));
    }

    #[test]
    fn test_split_name_sanitizes() {
        let (stem, ext) = split_name("my photo (1).JPG");
        assert_eq!(stem, "my_photo__1_");
        assert_eq!(ext, "jpg");

        let (stem, ext) = split_name("");
        assert_eq!(stem, "upload");
        assert_eq!(ext, "bin");
    }

    #[test]
    fn test_validate_relative_rejects_traversal() {
        assert!(validate_relative("posts_images/cat.jpg").is_ok());
        assert!(validate_relative("../etc/passwd").is_err());
        assert!(validate_relative("/etc/passwd").is_err());
        assert!(validate_relative("posts_images/../../x").is_err());
    }

    #[tokio::test]
    async fn test_store_and_remove() {
        let store = temp_store();

        let rel = store
            .store(MediaKind::PostImage, "cat.jpg", b"not really a jpeg")
            .await
            .unwrap();
        assert!(rel.starts_with("posts_images/"));
        assert!(rel.ends_with("_cat.jpg"));
        assert!(store.absolute(&rel).exists());

        // Same bytes, same name, same path
        let rel2 = store
            .store(MediaKind::PostImage, "cat.jpg", b"not really a jpeg")
            .await
            .unwrap();
        assert_eq!(rel, rel2);

        store.remove(&rel).await.unwrap();
        assert!(!store.absolute(&rel).exists());

        // Removing again is not an error
        store.remove(&rel).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_rejects_empty() {
        let store = temp_store();
        let result = store.store(MediaKind::ProfilePhoto, "x.png", b"").await;
        assert!(matches!(result, Err(MediaError::EmptyUpload)));
    }

    #[tokio::test]
    async fn test_remove_never_touches_placeholder() {
        let store = temp_store();
        store.remove(PLACEHOLDER_PHOTO).await.unwrap();
    }
}

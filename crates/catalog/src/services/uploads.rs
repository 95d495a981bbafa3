//! Image upload storage.
//!
//! Uploaded files land in a local directory served statically under
//! `/uploads`. Stored names are fresh UUIDs so client-supplied names never
//! touch the filesystem; only the (whitelisted) extension survives.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Extensions accepted for guitar images.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Filesystem error.
    #[error("upload i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension is missing or not an accepted image type.
    #[error("unsupported image type: {0:?}")]
    UnsupportedType(String),
}

/// Filesystem store for uploaded images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory uploads are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory cannot be created.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write an uploaded file, returning its public `/uploads/...` path.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UnsupportedType` if `original_name` has no
    /// whitelisted image extension, or `UploadError::Io` if the write fails.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, UploadError> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| UploadError::UnsupportedType(original_name.to_owned()))?;

        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(UploadError::UnsupportedType(ext));
        }

        let file_name = format!("{}.{ext}", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&file_name), data).await?;

        Ok(format!("/uploads/{file_name}"))
    }
}

//! Attachment Storage Module
//!
//! Stores todo attachments on the local filesystem and removes them again
//! when the todo field referencing them changes or the todo is deleted.
//!
//! # Architecture
//!
//! - **`naming`** - Stored file names, extension and image checks
//! - **`UploadStore`** - The upload directory plus the per-file size cap
//!
//! # Lifecycle
//!
//! A stored file belongs to exactly one todo field (`imagePath` or
//! `filePath`). The store itself keeps no index; callers store the new file,
//! update the record, then remove the file it replaced. Removing a file that
//! is already gone is not an error.
//!
//! Stored files are served read-only under `/uploads/<name>`.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;

use crate::backend::error::BackendError;

pub mod naming;

pub use naming::{is_allowed_image, is_safe_name, stored_name};

/// A file received from a client, fully buffered and already size-checked
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// File name as the client sent it
    pub original_name: String,
    pub bytes: Bytes,
}

/// Filesystem store for attachments
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: Arc<PathBuf>,
    max_file_bytes: u64,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_file_bytes: u64) -> Self {
        Self {
            dir: Arc::new(dir.into()),
            max_file_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Per-file byte cap
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    /// Create the upload directory if it does not exist
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(self.dir.as_path()).await
    }

    /// Resolve a stored name to its path, refusing anything that is not a
    /// bare file name
    pub fn path_for(&self, name: &str) -> Result<PathBuf, BackendError> {
        if !is_safe_name(name) {
            return Err(BackendError::invalid_input(format!(
                "Invalid stored file name: {name}"
            )));
        }
        Ok(self.dir.join(name))
    }

    /**
     * Write an upload under a freshly generated name.
     *
     * # Returns
     * The stored name, to be saved on the todo
     *
     * # Errors
     * `InvalidInput` if the file is over the cap; `Io` if the write fails
     */
    pub async fn store(&self, file: &IncomingFile) -> Result<String, BackendError> {
        if file.bytes.len() as u64 > self.max_file_bytes {
            return Err(BackendError::invalid_input(format!(
                "File too large, limit is {} bytes",
                self.max_file_bytes
            )));
        }

        let name = stored_name(&file.original_name);
        let path = self.path_for(&name)?;
        tokio::fs::write(&path, &file.bytes).await?;

        tracing::debug!(stored = %name, bytes = file.bytes.len(), "Stored upload");
        Ok(name)
    }

    /// Delete a stored file. A missing file counts as already deleted.
    pub async fn remove(&self, name: &str) -> Result<(), BackendError> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(stored = %name, "Removed upload");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a file after its record has already changed. The request has
    /// succeeded at this point, so a failure is only logged.
    pub async fn discard(&self, name: Option<&str>) {
        let Some(name) = name else {
            return;
        };
        if let Err(e) = self.remove(name).await {
            tracing::warn!(stored = %name, error = %e, "Failed to remove replaced upload");
        }
    }

    /// Whether a stored file is present on disk
    pub async fn exists(&self, name: &str) -> bool {
        match self.path_for(name) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

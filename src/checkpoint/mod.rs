//! Durable checkpoint persistence
//!
//! The checkpoint is a complete replacement snapshot: the full ordered list
//! of collections discovered so far, rewritten after every completed
//! collection. A reader must never observe a half-written document, so the
//! writer serializes to a temporary file, fsyncs, and renames over the
//! target. On POSIX systems the rename is atomic; a crash mid-write leaves
//! the previous snapshot intact.
//!
//! Exactly one crawl process is assumed to run against a given checkpoint
//! path at a time; there is no cross-process locking discipline here.

use crate::model::Collection;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Errors that can occur while persisting or reading a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Checkpoint JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write checkpoint to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read checkpoint from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for checkpoint operations
pub type CheckpointResult<T> = std::result::Result<T, CheckpointError>;

/// Sink for crawl progress snapshots.
///
/// Implementations receive the full accumulated collection list on every
/// call and replace whatever was persisted before. The slice is serialized
/// before the first await point, so later crawler mutations cannot corrupt
/// an in-flight snapshot.
#[async_trait]
pub trait CheckpointSink: Send {
    /// Durably persists the complete snapshot.
    async fn write_snapshot(&mut self, collections: &[Collection]) -> CheckpointResult<()>;
}

/// Checkpoint writer producing a pretty-printed JSON document.
///
/// The document is an ordered array of collection records using the
/// downstream field names (`user`, `name`, `id`, `url`, `posts`), indented
/// with two spaces.
pub struct JsonCheckpointWriter {
    path: PathBuf,
}

impl JsonCheckpointWriter {
    /// Creates a writer targeting `path`. Nothing is written until the first
    /// snapshot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The checkpoint path this writer targets
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        // Single writer per checkpoint path, so a fixed sibling name is
        // enough; it must live on the same filesystem for rename to be
        // atomic.
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "checkpoint".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CheckpointSink for JsonCheckpointWriter {
    async fn write_snapshot(&mut self, collections: &[Collection]) -> CheckpointResult<()> {
        // Serialize up front; everything after this is pure IO.
        let document = serde_json::to_vec_pretty(collections)?;

        let temp_path = self.temp_path();
        if let Err(source) = self.persist(&temp_path, &document).await {
            // Don't leave a stale temp sibling next to the live snapshot.
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(CheckpointError::Write {
                path: self.path.clone(),
                source,
            });
        }

        tracing::info!(
            "Checkpoint saved to {} ({} collections)",
            self.path.display(),
            collections.len()
        );

        Ok(())
    }
}

impl JsonCheckpointWriter {
    async fn persist(&self, temp_path: &Path, document: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(temp_path).await?;
        file.write_all(document).await?;

        // Data must be on disk before the rename makes it visible.
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(temp_path, &self.path).await?;

        // Rename durability requires the parent directory to be synced on
        // some systems; best effort.
        #[cfg(unix)]
        if let Some(parent) = self.path.parent() {
            if let Ok(dir) = tokio::fs::File::open(parent).await {
                let _ = dir.sync_all().await;
            }
        }

        Ok(())
    }
}

/// Reads a checkpoint document back into collection records.
///
/// Used on resume and by the inspection CLI. Because writes are atomic, the
/// document is always exactly the state as of the last successful
/// `write_snapshot`.
pub fn read_snapshot(path: &Path) -> CheckpointResult<Vec<Collection>> {
    let content = std::fs::read_to_string(path).map_err(|source| CheckpointError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let collections = serde_json::from_str(&content)?;
    Ok(collections)
}

//! Checkpoint file I/O
//!
//! The checkpoint is a single slot at `{output_dir}/checkpoint.json`: it holds
//! either nothing or the one task currently in flight. Saving replaces it,
//! clearing deletes it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::atomic::{atomic_write, read_if_exists};
use crate::models::TaskCheckpoint;

#[derive(Debug, Clone)]
pub struct CheckpointSlot {
    path: PathBuf,
}

impl CheckpointSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the checkpoint, if any.
    ///
    /// A file that does not parse is reported and treated as absent; it stays
    /// on disk until the next `save` or `clear`.
    pub fn load(&self) -> Result<Option<TaskCheckpoint>> {
        let Some(content) = read_if_exists(&self.path)? else {
            return Ok(None);
        };

        match serde_json::from_str::<TaskCheckpoint>(&content) {
            Ok(checkpoint) => Ok(Some(checkpoint)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable checkpoint file"
                );
                Ok(None)
            }
        }
    }

    /// Write the checkpoint, replacing whatever the slot held.
    pub fn save(&self, checkpoint: &TaskCheckpoint) -> Result<()> {
        let json = serde_json::to_string_pretty(checkpoint)
            .context("Failed to serialize checkpoint to JSON")?;
        atomic_write(&self.path, &json)
            .with_context(|| format!("Failed to write checkpoint: {}", self.path.display()))
    }

    /// Delete the checkpoint file. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to delete checkpoint: {}", self.path.display())),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::constants::files;

/// Layout of the directory holding the stores and the checkpoint
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn ensure(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).with_context(|| {
                format!("Failed to create output directory: {}", self.root.display())
            })?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn valid_store_path(&self) -> PathBuf {
        self.root.join(files::VALID_STORE)
    }

    pub fn invalid_store_path(&self) -> PathBuf {
        self.root.join(files::INVALID_STORE)
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.root.join(files::CHECKPOINT)
    }
}

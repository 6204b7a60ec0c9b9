//! Durable valid/invalid lead stores
//!
//! Each store is a pretty-printed JSON array of leads. Appending reads the
//! whole array, extends it and writes it back; the process is the only writer.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::atomic::{atomic_write, read_if_exists};
use super::output_dir::OutputDir;
use crate::models::Lead;

/// One append-only JSON array of leads
#[derive(Debug, Clone)]
pub struct OutputStore {
    path: PathBuf,
}

impl OutputStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored lead. Missing or unparseable files load as empty.
    pub fn load(&self) -> Result<Vec<Lead>> {
        let Some(content) = read_if_exists(&self.path)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Lead>>(&content) {
            Ok(leads) => Ok(leads),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Output store is unreadable, treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Append leads to the end of the store.
    pub fn append(&self, leads: &[Lead]) -> Result<()> {
        if leads.is_empty() {
            return Ok(());
        }

        let mut stored = self.load()?;
        stored.extend_from_slice(leads);

        let json =
            serde_json::to_string_pretty(&stored).context("Failed to serialize output store")?;
        atomic_write(&self.path, &json)
            .with_context(|| format!("Failed to write output store: {}", self.path.display()))
    }
}

/// Counts of leads actually written by [`LeadSink::record`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recorded {
    pub valid: usize,
    pub invalid: usize,
    /// Leads dropped because their email was already classified
    pub skipped: usize,
}

/// The pair of output stores plus the set of emails they already hold
#[derive(Debug)]
pub struct LeadSink {
    valid: OutputStore,
    invalid: OutputStore,
    classified: HashSet<String>,
}

impl LeadSink {
    pub fn open(dir: &OutputDir) -> Result<Self> {
        Self::from_stores(
            OutputStore::new(dir.valid_store_path()),
            OutputStore::new(dir.invalid_store_path()),
        )
    }

    pub fn from_stores(valid: OutputStore, invalid: OutputStore) -> Result<Self> {
        let classified = valid
            .load()?
            .iter()
            .chain(invalid.load()?.iter())
            .map(Lead::key)
            .collect();

        Ok(Self {
            valid,
            invalid,
            classified,
        })
    }

    /// Whether a normalized email is already in either store
    pub fn is_classified(&self, key: &str) -> bool {
        self.classified.contains(key)
    }

    pub fn classified_count(&self) -> usize {
        self.classified.len()
    }

    pub fn valid_store(&self) -> &OutputStore {
        &self.valid
    }

    pub fn invalid_store(&self) -> &OutputStore {
        &self.invalid
    }

    /// Append classified leads, skipping any email already stored.
    pub fn record(&mut self, valid: Vec<Lead>, invalid: Vec<Lead>) -> Result<Recorded> {
        let mut recorded = Recorded::default();
        let mut batch_keys = HashSet::new();

        let mut fresh = |leads: Vec<Lead>, classified: &HashSet<String>| -> Vec<Lead> {
            leads
                .into_iter()
                .filter(|lead| {
                    let key = lead.key();
                    let keep = !classified.contains(&key) && batch_keys.insert(key);
                    if !keep {
                        recorded.skipped += 1;
                    }
                    keep
                })
                .collect()
        };

        let valid = fresh(valid, &self.classified);
        let invalid = fresh(invalid, &self.classified);

        self.valid.append(&valid)?;
        recorded.valid = valid.len();
        self.classified.extend(valid.iter().map(Lead::key));

        self.invalid.append(&invalid)?;
        recorded.invalid = invalid.len();
        self.classified.extend(invalid.iter().map(Lead::key));

        Ok(recorded)
    }
}

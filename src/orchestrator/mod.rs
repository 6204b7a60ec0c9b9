//! Batch orchestration for a verification run
//!
//! The orchestrator is the heart of `leadsift run`. It:
//! - Reattaches to a task left behind by an interrupted run
//! - Works out which leads still need verifying
//! - Submits them batch by batch, strictly one task at a time
//! - Checkpoints each task before waiting on it
//! - Routes every verdict into the valid or invalid store

pub mod batching;
pub mod classify;
pub mod core;
pub mod resume;
pub mod summary;

use std::time::Duration;
use thiserror::Error;

use crate::models::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS,
    DEFAULT_PROBE_TIMEOUT_SECS,
};

pub use self::core::BatchOrchestrator;
pub use batching::{partition, pending_leads, PendingLeads};
pub use classify::{classify, Classification, LeadIndex};
pub use resume::{ResumeController, ResumeOutcome};
pub use summary::RunSummary;

/// Configuration for a run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub batch_size: usize,
    /// Delay between result polls
    pub poll_interval: Duration,
    /// Budget for waiting on a batch submitted during this run
    pub poll_timeout: Duration,
    /// Budget for the startup probe of a checkpointed task
    pub probe_timeout: Duration,
    pub task_name_prefix: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            poll_timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            task_name_prefix: "leadsift".to_string(),
        }
    }
}

/// Conditions that end a run early
#[derive(Debug, Error)]
pub enum RunError {
    /// The checkpointed task has not finished; submitting again would
    /// verify (and bill) the same addresses twice.
    #[error(
        "Task {task_id} (batch {batch}) is still processing on the verification service. \
         Wait for it to finish and run again, or abandon it with `leadsift checkpoint clear`."
    )]
    ResumeBlocked { task_id: String, batch: String },

    /// Reading or writing the stores or the checkpoint failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

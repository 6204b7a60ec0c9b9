//! Checkpoint types for in-flight verification tasks
//!
//! A checkpoint is written right after a batch is accepted by the service and
//! removed once that batch's results are stored. At most one exists at a time;
//! finding one on startup means the previous run stopped mid-batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a remote verification task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Submitted and not yet finished on the service side
    Processing,
    /// Finished; results are available
    Completed,
    /// The service gave up on the task
    Error,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Processing => write!(f, "processing"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Error => write!(f, "error"),
        }
    }
}

/// Durable record of the single in-flight remote task
///
/// File location: `{output_dir}/checkpoint.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCheckpoint {
    /// Task identifier assigned by the service
    pub task_id: String,
    /// Zero-based index of the batch this task carries
    pub batch_index: usize,
    /// Batch count of the run that submitted the task
    pub total_batches: usize,
    pub created_at: DateTime<Utc>,
    pub email_count: usize,
    /// Emails exactly as submitted
    pub emails: Vec<String>,
    pub status: TaskStatus,
}

impl TaskCheckpoint {
    pub fn new(
        task_id: String,
        batch_index: usize,
        total_batches: usize,
        emails: Vec<String>,
    ) -> Self {
        Self {
            task_id,
            batch_index,
            total_batches,
            created_at: Utc::now(),
            email_count: emails.len(),
            emails,
            status: TaskStatus::Processing,
        }
    }

    /// One-based "n/total" label used in logs and task names
    pub fn batch_label(&self) -> String {
        format!("{}/{}", self.batch_index + 1, self.total_batches)
    }
}

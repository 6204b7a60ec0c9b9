use std::time::Duration;
use thiserror::Error;

/// Failures talking to the verification service
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Service rejected the request: {0}")]
    Rejected(String),

    #[error("Task {task_id} failed with status '{status}'")]
    TaskFailed { task_id: String, status: String },

    #[error("Task {0} not found")]
    TaskNotFound(String),

    #[error("Timed out after {}s waiting for task {task_id}", waited.as_secs())]
    Timeout { task_id: String, waited: Duration },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl VerifyError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, VerifyError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;

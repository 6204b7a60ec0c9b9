//! Client side of the bulk email verification service
//!
//! [`VerificationService`] is the seam between the orchestrator and the
//! network: the HTTP adapter implements it for real runs, tests implement it
//! in memory. Every call is a single round trip with no retry; polling is the
//! only loop, and it lives in [`poll_until_settled`].

pub mod error;
pub mod http;
pub mod types;

use std::thread;
use std::time::{Duration, Instant};

pub use error::VerifyError;
pub use http::HttpVerificationClient;
pub use types::{AccountBalance, CreatedTask, ResultStatus, TaskResult};

/// Operations offered by the verification service
pub trait VerificationService {
    /// Remaining account credits.
    fn check_balance(&self) -> error::Result<AccountBalance>;

    /// Submit a list of emails as one bulk task.
    fn create_task(&self, emails: &[String], name: &str) -> error::Result<CreatedTask>;

    /// Fetch the current state of a task once.
    fn fetch_results(&self, task_id: &str) -> error::Result<TaskResult>;

    /// Wait for a task to finish. See [`poll_until_settled`].
    fn poll_results(
        &self,
        task_id: &str,
        max_wait: Duration,
        poll_interval: Duration,
    ) -> error::Result<TaskResult> {
        poll_until_settled(self, task_id, max_wait, poll_interval)
    }
}

/// Poll a task until it completes, fails, or `max_wait` runs out.
///
/// A completed task returns its results. An `error` or `not_found` status
/// ends the wait with a failure. Any other status sleeps `poll_interval` and
/// asks again, unless the next attempt would land past `max_wait`.
pub fn poll_until_settled<S>(
    service: &S,
    task_id: &str,
    max_wait: Duration,
    poll_interval: Duration,
) -> error::Result<TaskResult>
where
    S: VerificationService + ?Sized,
{
    let started = Instant::now();

    loop {
        let result = service.fetch_results(task_id)?;

        match result.status {
            ResultStatus::Completed => return Ok(result),
            ResultStatus::Error => {
                return Err(VerifyError::TaskFailed {
                    task_id: task_id.to_string(),
                    status: result.status_label,
                })
            }
            ResultStatus::NotFound => return Err(VerifyError::TaskNotFound(task_id.to_string())),
            ResultStatus::Processing => {
                tracing::info!(
                    task_id,
                    status = %result.status_label,
                    progress = result.progress_percent,
                    checked = result.count_checked,
                    total = result.count_total,
                    "Task still processing"
                );
            }
        }

        let waited = started.elapsed();
        if waited + poll_interval >= max_wait {
            return Err(VerifyError::Timeout {
                task_id: task_id.to_string(),
                waited,
            });
        }
        thread::sleep(poll_interval);
    }
}

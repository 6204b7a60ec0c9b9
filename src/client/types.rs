//! Request and response shapes of the bulk verification API, and their
//! mapping onto the crate's own types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{Result, VerifyError};
use crate::models::Verdict;

/// Remaining credits on the account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalance {
    pub daily_credits: u64,
    pub instant_credits: u64,
}

/// A task the service accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    pub task_id: String,
    pub count_submitted: u64,
    pub count_duplicates_removed: u64,
    pub count_rejected: u64,
    pub count_processing: u64,
}

/// Where a remote task stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Processing,
    Completed,
    Error,
    NotFound,
}

impl ResultStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "completed" => ResultStatus::Completed,
            "error" | "failed" => ResultStatus::Error,
            "file_not_found" | "task_not_found" | "not_found" => ResultStatus::NotFound,
            _ => ResultStatus::Processing,
        }
    }
}

/// One snapshot of a task's progress
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub task_id: String,
    pub status: ResultStatus,
    /// Status label exactly as the service sent it
    pub status_label: String,
    pub progress_percent: f64,
    pub count_checked: u64,
    pub count_total: u64,
    /// Per-email verdicts in service order; empty until completed
    pub verdicts: Vec<(String, Verdict)>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTaskRequest<'a> {
    pub name: &'a str,
    pub emails: &'a [String],
    pub key: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTaskResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    task_id: Option<Value>,
    #[serde(default)]
    count_submitted: Option<Value>,
    #[serde(default)]
    count_duplicates_removed: Option<Value>,
    #[serde(default)]
    count_rejected_emails: Option<Value>,
    #[serde(default)]
    count_processing: Option<Value>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    task_id: Option<Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    count_total: Option<Value>,
    #[serde(default)]
    count_checked: Option<Value>,
    #[serde(default)]
    progress_percentage: Option<Value>,
    #[serde(default)]
    results: Option<Map<String, Value>>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    api_status: Option<String>,
    #[serde(default)]
    remaining_daily_credits: Option<Value>,
    #[serde(default)]
    remaining_instant_credits: Option<Value>,
    #[serde(default)]
    reason: Option<String>,
}

/// Numbers sometimes arrive as strings.
fn as_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    }
}

fn as_count(value: Option<&Value>) -> u64 {
    as_f64(value).map(|n| n.max(0.0) as u64).unwrap_or(0)
}

fn as_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn parse_create_response(body: &str) -> Result<CreatedTask> {
    let response: CreateTaskResponse = serde_json::from_str(body)?;
    let status = response.status.as_deref().unwrap_or_default();

    match (status.eq_ignore_ascii_case("success"), as_id(response.task_id.as_ref())) {
        (true, Some(task_id)) => Ok(CreatedTask {
            task_id,
            count_submitted: as_count(response.count_submitted.as_ref()),
            count_duplicates_removed: as_count(response.count_duplicates_removed.as_ref()),
            count_rejected: as_count(response.count_rejected_emails.as_ref()),
            count_processing: as_count(response.count_processing.as_ref()),
        }),
        _ => Err(VerifyError::Rejected(response.reason.unwrap_or_else(|| {
            if status.is_empty() {
                "no task id in response".to_string()
            } else {
                format!("status '{status}'")
            }
        }))),
    }
}

pub(crate) fn parse_results_response(task_id: &str, body: &str) -> Result<TaskResult> {
    let response: ResultsResponse = serde_json::from_str(body)?;
    let label = response.status.clone().unwrap_or_default();
    let mut status = ResultStatus::from_label(&label);

    // A bad task id comes back as a generic error carrying a reason.
    if status == ResultStatus::Error
        && response
            .reason
            .as_deref()
            .is_some_and(|r| r.to_lowercase().contains("not found"))
    {
        status = ResultStatus::NotFound;
    }

    let mut verdicts = Vec::new();
    if status == ResultStatus::Completed {
        for (email, raw) in response.results.unwrap_or_default() {
            match serde_json::from_value::<Verdict>(raw) {
                Ok(verdict) => verdicts.push((email, verdict)),
                Err(e) => {
                    tracing::warn!(task_id, email = %email, error = %e, "Skipping unreadable verdict");
                }
            }
        }
    }

    Ok(TaskResult {
        task_id: as_id(response.task_id.as_ref()).unwrap_or_else(|| task_id.to_string()),
        status,
        status_label: label,
        progress_percent: as_f64(response.progress_percentage.as_ref()).unwrap_or(0.0),
        count_checked: as_count(response.count_checked.as_ref()),
        count_total: as_count(response.count_total.as_ref()),
        verdicts,
    })
}

pub(crate) fn parse_balance_response(body: &str) -> Result<AccountBalance> {
    let response: BalanceResponse = serde_json::from_str(body)?;

    match (
        response.remaining_daily_credits.as_ref(),
        response.remaining_instant_credits.as_ref(),
    ) {
        (None, None) => Err(VerifyError::Rejected(
            response
                .reason
                .or(response.api_status)
                .unwrap_or_else(|| "balance unavailable".to_string()),
        )),
        (daily, instant) => Ok(AccountBalance {
            daily_credits: as_count(daily),
            instant_credits: as_count(instant),
        }),
    }
}

/// Best human-readable message from an error body.
pub(crate) fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        reason: Option<String>,
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.reason.or(b.message))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

//! Shared test helpers: an in-memory verification service and fixtures

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use leadsift::client::error::Result as VerifyResult;
use leadsift::client::{
    AccountBalance, CreatedTask, ResultStatus, TaskResult, VerificationService, VerifyError,
};
use leadsift::fs::{CheckpointSlot, OutputDir, OutputStore};
use leadsift::models::{Lead, TaskCheckpoint, Verdict};
use leadsift::orchestrator::RunConfig;
use serde_json::json;
use tempfile::TempDir;

struct MockTask {
    emails: Vec<String>,
    status: ResultStatus,
}

#[derive(Default)]
struct MockState {
    next_id: usize,
    tasks: HashMap<String, MockTask>,
    failing_creates: HashSet<usize>,
    stuck_creates: HashSet<usize>,
    created: Vec<Vec<String>>,
    names: Vec<String>,
    fetches: Vec<String>,
    balance_calls: usize,
}

/// In-memory stand-in for the verification service.
///
/// Emails containing "bad" come back undeliverable, emails containing "trap"
/// come back as spamtraps, everything else passes with an empty verdict.
#[derive(Default)]
pub struct MockService {
    state: RefCell<MockState>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The n-th `create_task` call (0-based) is rejected by the service.
    pub fn fail_create(self, call: usize) -> Self {
        self.state.borrow_mut().failing_creates.insert(call);
        self
    }

    /// The task from the n-th `create_task` call never finishes.
    pub fn stall_create(self, call: usize) -> Self {
        self.state.borrow_mut().stuck_creates.insert(call);
        self
    }

    /// A task that already exists on the service, e.g. from a crashed run.
    pub fn with_task(self, task_id: &str, emails: &[String], status: ResultStatus) -> Self {
        self.state.borrow_mut().tasks.insert(
            task_id.to_string(),
            MockTask {
                emails: emails.to_vec(),
                status,
            },
        );
        self
    }

    pub fn created(&self) -> Vec<Vec<String>> {
        self.state.borrow().created.clone()
    }

    pub fn task_names(&self) -> Vec<String> {
        self.state.borrow().names.clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.state.borrow().fetches.clone()
    }

    /// Every call made so far, of any kind
    pub fn total_calls(&self) -> usize {
        let state = self.state.borrow();
        state.names.len() + state.fetches.len() + state.balance_calls
    }
}

fn verdict_for(email: &str) -> Verdict {
    if email.contains("bad") {
        Verdict {
            is_deliverable: Some(false),
            status: Some("invalid".to_string()),
            ..Default::default()
        }
    } else if email.contains("trap") {
        Verdict {
            is_spamtrap: Some(true),
            ..Default::default()
        }
    } else {
        Verdict::default()
    }
}

impl VerificationService for MockService {
    fn check_balance(&self) -> VerifyResult<AccountBalance> {
        self.state.borrow_mut().balance_calls += 1;
        Ok(AccountBalance {
            daily_credits: 1000,
            instant_credits: 0,
        })
    }

    fn create_task(&self, emails: &[String], name: &str) -> VerifyResult<CreatedTask> {
        let mut state = self.state.borrow_mut();
        let call = state.names.len();
        state.names.push(name.to_string());

        if state.failing_creates.contains(&call) {
            return Err(VerifyError::Rejected("Not enough credits".to_string()));
        }

        state.created.push(emails.to_vec());
        state.next_id += 1;
        let task_id = format!("task-{}", state.next_id);
        let status = if state.stuck_creates.contains(&call) {
            ResultStatus::Processing
        } else {
            ResultStatus::Completed
        };
        state.tasks.insert(
            task_id.clone(),
            MockTask {
                emails: emails.to_vec(),
                status,
            },
        );

        Ok(CreatedTask {
            task_id,
            count_submitted: emails.len() as u64,
            count_duplicates_removed: 0,
            count_rejected: 0,
            count_processing: emails.len() as u64,
        })
    }

    fn fetch_results(&self, task_id: &str) -> VerifyResult<TaskResult> {
        let mut state = self.state.borrow_mut();
        state.fetches.push(task_id.to_string());

        let Some(task) = state.tasks.get(task_id) else {
            return Ok(TaskResult {
                task_id: task_id.to_string(),
                status: ResultStatus::NotFound,
                status_label: "task_not_found".to_string(),
                progress_percent: 0.0,
                count_checked: 0,
                count_total: 0,
                verdicts: Vec::new(),
            });
        };

        let completed = task.status == ResultStatus::Completed;
        let verdicts = if completed {
            task.emails
                .iter()
                .map(|email| (email.to_lowercase(), verdict_for(email)))
                .collect()
        } else {
            Vec::new()
        };
        let total = task.emails.len() as u64;

        Ok(TaskResult {
            task_id: task_id.to_string(),
            status: task.status,
            status_label: format!("{:?}", task.status).to_lowercase(),
            progress_percent: if completed { 100.0 } else { 40.0 },
            count_checked: if completed { total } else { total / 2 },
            count_total: total,
            verdicts,
        })
    }
}

/// Run settings that never sleep
pub fn fast_config(batch_size: usize) -> RunConfig {
    RunConfig {
        batch_size,
        poll_interval: Duration::ZERO,
        poll_timeout: Duration::from_secs(5),
        probe_timeout: Duration::ZERO,
        task_name_prefix: "test".to_string(),
    }
}

/// `count` leads named user{i}@example.com, each with a passthrough field
pub fn numbered_leads(count: usize) -> Vec<Lead> {
    (0..count)
        .map(|i| Lead::new(format!("user{i}@example.com")).with_field("row", json!(i)))
        .collect()
}

pub fn emails_of(leads: &[Lead]) -> Vec<String> {
    leads.iter().map(|lead| lead.email.clone()).collect()
}

pub fn output_in(temp: &TempDir) -> OutputDir {
    OutputDir::new(temp.path().join("out"))
}

pub fn stored_valid(output: &OutputDir) -> Vec<Lead> {
    OutputStore::new(output.valid_store_path()).load().unwrap()
}

pub fn stored_invalid(output: &OutputDir) -> Vec<Lead> {
    OutputStore::new(output.invalid_store_path()).load().unwrap()
}

pub fn checkpoint_slot(output: &OutputDir) -> CheckpointSlot {
    CheckpointSlot::new(output.checkpoint_path())
}

/// Write a checkpoint as an interrupted run would have left it
pub fn leave_checkpoint(
    output: &OutputDir,
    task_id: &str,
    batch_index: usize,
    total_batches: usize,
    emails: Vec<String>,
) -> TaskCheckpoint {
    output.ensure().unwrap();
    let checkpoint = TaskCheckpoint::new(task_id.to_string(), batch_index, total_batches, emails);
    checkpoint_slot(output).save(&checkpoint).unwrap();
    checkpoint
}

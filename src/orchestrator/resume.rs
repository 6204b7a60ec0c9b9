//! Reattaching to a task left behind by an interrupted run
//!
//! The checkpoint is probed with a short budget instead of the full polling
//! budget. A finished task is harvested, a task that is still running blocks
//! the run, and anything else means the checkpoint is stale.

use std::collections::HashSet;
use std::time::Duration;

use super::classify::{classify, LeadIndex};
use super::RunError;
use crate::client::{VerificationService, VerifyError};
use crate::fs::checkpoints::CheckpointSlot;
use crate::fs::stores::{LeadSink, Recorded};
use crate::models::{normalize_email, Lead, TaskCheckpoint};

/// What the run should do after handling a checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// The checkpointed task finished and its results were stored.
    Reattached {
        task_id: String,
        next_index: usize,
        recorded: Recorded,
        unmatched: usize,
    },
    /// The checkpoint pointed at a task that can no longer deliver results
    /// and was deleted. The run starts from batch 0.
    Discarded { task_id: String, reason: String },
}

impl ResumeOutcome {
    /// Index of the first batch the run should submit
    pub fn start_index(&self) -> usize {
        match self {
            ResumeOutcome::Reattached { next_index, .. } => *next_index,
            ResumeOutcome::Discarded { .. } => 0,
        }
    }
}

pub struct ResumeController<'a, S: VerificationService + ?Sized> {
    service: &'a S,
    slot: &'a CheckpointSlot,
    probe_timeout: Duration,
    poll_interval: Duration,
}

impl<'a, S: VerificationService + ?Sized> ResumeController<'a, S> {
    pub fn new(
        service: &'a S,
        slot: &'a CheckpointSlot,
        probe_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            service,
            slot,
            probe_timeout,
            poll_interval,
        }
    }

    /// Probe the checkpointed task and settle it.
    ///
    /// Leads are looked up by email in the full input list; the checkpoint
    /// only records which emails were in flight.
    pub fn resume(
        &self,
        checkpoint: &TaskCheckpoint,
        leads: &[Lead],
        sink: &mut LeadSink,
    ) -> Result<ResumeOutcome, RunError> {
        tracing::info!(
            task_id = %checkpoint.task_id,
            batch = %checkpoint.batch_label(),
            emails = checkpoint.email_count,
            created_at = %checkpoint.created_at,
            "Found checkpoint from a previous run, probing task"
        );

        let probe = self.service.poll_results(
            &checkpoint.task_id,
            self.probe_timeout,
            self.poll_interval.min(self.probe_timeout),
        );

        let result = match probe {
            Ok(result) => result,
            Err(VerifyError::Timeout { .. }) => {
                return Err(RunError::ResumeBlocked {
                    task_id: checkpoint.task_id.clone(),
                    batch: checkpoint.batch_label(),
                });
            }
            Err(e) => {
                tracing::warn!(
                    task_id = %checkpoint.task_id,
                    batch = %checkpoint.batch_label(),
                    error = %e,
                    "Checkpointed task cannot be recovered, discarding checkpoint"
                );
                self.slot.clear()?;
                return Ok(ResumeOutcome::Discarded {
                    task_id: checkpoint.task_id.clone(),
                    reason: e.to_string(),
                });
            }
        };

        let in_flight: HashSet<String> = checkpoint
            .emails
            .iter()
            .map(|email| normalize_email(email))
            .collect();
        let index = LeadIndex::from_leads(leads.iter().filter(|lead| in_flight.contains(&lead.key())));

        let classification = classify(&result.verdicts, &index);
        let recorded = sink.record(classification.valid, classification.invalid)?;
        self.slot.clear()?;

        tracing::info!(
            task_id = %checkpoint.task_id,
            batch = %checkpoint.batch_label(),
            valid = recorded.valid,
            invalid = recorded.invalid,
            "Recovered results of checkpointed task"
        );

        Ok(ResumeOutcome::Reattached {
            task_id: checkpoint.task_id.clone(),
            next_index: checkpoint.batch_index + 1,
            recorded,
            unmatched: classification.unmatched,
        })
    }
}

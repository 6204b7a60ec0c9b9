//! Main orchestrator: the per-run batch loop

use anyhow::Result;
use chrono::Utc;

use super::batching::{partition, pending_leads};
use super::classify::{classify, LeadIndex};
use super::resume::{ResumeController, ResumeOutcome};
use super::summary::RunSummary;
use super::{RunConfig, RunError};
use crate::client::VerificationService;
use crate::filter::filter_batch;
use crate::fs::checkpoints::CheckpointSlot;
use crate::fs::output_dir::OutputDir;
use crate::fs::stores::LeadSink;
use crate::models::{Lead, TaskCheckpoint};

/// Drives leads through submit, poll and classify, one batch at a time
pub struct BatchOrchestrator<'a, S: VerificationService + ?Sized> {
    service: &'a S,
    config: RunConfig,
    checkpoints: CheckpointSlot,
    sink: LeadSink,
}

impl<'a, S: VerificationService + ?Sized> BatchOrchestrator<'a, S> {
    /// Open the stores and checkpoint slot in `output`, creating the directory
    /// if needed.
    pub fn new(service: &'a S, config: RunConfig, output: &OutputDir) -> Result<Self> {
        output.ensure()?;
        Ok(Self {
            service,
            config,
            checkpoints: CheckpointSlot::new(output.checkpoint_path()),
            sink: LeadSink::open(output)?,
        })
    }

    pub fn sink(&self) -> &LeadSink {
        &self.sink
    }

    /// Run to completion over `leads`.
    ///
    /// Batch-level failures are logged and skipped. Only an unfinished
    /// checkpointed task or a storage failure ends the run with an error.
    pub fn run(&mut self, leads: &[Lead]) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();

        let start_index = self.resume_checkpoint(leads, &mut summary)?;

        let pending = pending_leads(leads, &self.sink);
        summary.pending = pending.len();
        summary.invalid_local += pending.invalid_local;
        summary.duplicate_local += pending.duplicate_local;
        if pending.invalid_local > 0 || pending.duplicate_local > 0 {
            tracing::info!(
                malformed = pending.invalid_local,
                repeated = pending.duplicate_local,
                "Left out leads that cannot be submitted"
            );
        }
        if pending.is_empty() {
            tracing::info!(total = leads.len(), "All leads are already classified");
            return Ok(summary);
        }

        self.report_balance();

        let batches = partition(&pending.leads, self.config.batch_size);
        let total = start_index + batches.len();
        summary.batches_total = batches.len();
        tracing::info!(
            pending = pending.len(),
            batches = batches.len(),
            batch_size = self.config.batch_size,
            first_batch = start_index + 1,
            "Starting verification"
        );

        for (offset, batch) in batches.iter().enumerate() {
            self.process_batch(start_index + offset, total, batch, &mut summary)?;
        }

        Ok(summary)
    }

    fn resume_checkpoint(
        &mut self,
        leads: &[Lead],
        summary: &mut RunSummary,
    ) -> Result<usize, RunError> {
        let Some(checkpoint) = self.checkpoints.load()? else {
            return Ok(0);
        };

        let controller = ResumeController::new(
            self.service,
            &self.checkpoints,
            self.config.probe_timeout,
            self.config.poll_interval,
        );
        let outcome = controller.resume(&checkpoint, leads, &mut self.sink)?;

        match &outcome {
            ResumeOutcome::Reattached {
                task_id,
                recorded,
                unmatched,
                ..
            } => {
                summary.add_recorded(*recorded);
                summary.unmatched += unmatched;
                summary.resumed_task = Some(task_id.clone());
            }
            ResumeOutcome::Discarded { task_id, reason } => {
                tracing::info!(task_id = %task_id, reason = %reason, "Starting over from the first batch");
                summary.discarded_task = Some(format!("{task_id} ({reason})"));
            }
        }

        Ok(outcome.start_index())
    }

    fn report_balance(&self) {
        match self.service.check_balance() {
            Ok(balance) => tracing::info!(
                daily_credits = balance.daily_credits,
                instant_credits = balance.instant_credits,
                "Account balance"
            ),
            Err(e) => tracing::warn!(error = %e, "Account balance unavailable"),
        }
    }

    fn process_batch(
        &mut self,
        index: usize,
        total: usize,
        batch: &[&Lead],
        summary: &mut RunSummary,
    ) -> Result<(), RunError> {
        let label = format!("{}/{}", index + 1, total);
        let raw: Vec<&str> = batch.iter().map(|lead| lead.email.as_str()).collect();
        let filtered = filter_batch(&raw);
        summary.invalid_local += filtered.invalid_count();
        summary.duplicate_local += filtered.duplicate_count;

        if !filtered.rejected.is_empty() {
            tracing::debug!(batch = %label, rejected = ?filtered.rejected, "Dropped malformed addresses");
        }
        if filtered.emails.is_empty() {
            tracing::warn!(batch = %label, "Nothing to submit after local filtering, skipping batch");
            summary.batches_skipped += 1;
            return Ok(());
        }

        let name = task_name(&self.config.task_name_prefix, index, total);
        let task = match self.service.create_task(&filtered.emails, &name) {
            Ok(task) => task,
            Err(e) => {
                tracing::error!(batch = %label, error = %e, "Failed to create verification task, skipping batch");
                summary.batches_failed += 1;
                return Ok(());
            }
        };
        summary.duplicates_removed_by_service += task.count_duplicates_removed;
        summary.rejected_by_service += task.count_rejected;
        tracing::info!(
            batch = %label,
            task_id = %task.task_id,
            submitted = task.count_submitted,
            duplicates_removed = task.count_duplicates_removed,
            rejected = task.count_rejected,
            processing = task.count_processing,
            "Task created"
        );

        let checkpoint = TaskCheckpoint::new(task.task_id.clone(), index, total, filtered.emails);
        self.checkpoints.save(&checkpoint)?;

        let result = match self.service.poll_results(
            &task.task_id,
            self.config.poll_timeout,
            self.config.poll_interval,
        ) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    batch = %label,
                    task_id = %task.task_id,
                    error = %e,
                    "No results for task, skipping batch; checkpoint kept for the next run"
                );
                summary.batches_failed += 1;
                return Ok(());
            }
        };

        let lead_index = LeadIndex::from_leads(batch.iter().copied());
        let classification = classify(&result.verdicts, &lead_index);
        summary.unmatched += classification.unmatched;
        let recorded = self
            .sink
            .record(classification.valid, classification.invalid)?;
        summary.add_recorded(recorded);
        self.checkpoints.clear()?;
        summary.batches_completed += 1;

        tracing::info!(
            batch = %label,
            task_id = %task.task_id,
            valid = recorded.valid,
            invalid = recorded.invalid,
            "Batch classified"
        );
        Ok(())
    }
}

/// Name shown for the task in the service dashboard
fn task_name(prefix: &str, index: usize, total: usize) -> String {
    format!(
        "{prefix} batch {}/{} {}",
        index + 1,
        total,
        Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    )
}

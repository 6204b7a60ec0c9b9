use crate::fs::stores::Recorded;

/// Counters accumulated over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Leads added to the valid store
    pub valid: usize,
    /// Leads added to the invalid store
    pub invalid: usize,
    /// Duplicates the service removed on its side
    pub duplicates_removed_by_service: u64,
    /// Addresses the service refused to verify
    pub rejected_by_service: u64,
    /// Addresses dropped locally for failing the syntax check
    pub invalid_local: usize,
    /// Repeated addresses dropped locally
    pub duplicate_local: usize,
    /// Leads not written because their email was already stored
    pub already_stored: usize,
    /// Verdicts for emails that matched no lead
    pub unmatched: usize,
    pub pending: usize,
    pub batches_total: usize,
    pub batches_completed: usize,
    pub batches_failed: usize,
    /// Batches with nothing left to submit after local filtering
    pub batches_skipped: usize,
    /// Task recovered from a previous run's checkpoint
    pub resumed_task: Option<String>,
    /// Checkpointed task abandoned as unrecoverable, with the reason
    pub discarded_task: Option<String>,
}

impl RunSummary {
    pub fn add_recorded(&mut self, recorded: Recorded) {
        self.valid += recorded.valid;
        self.invalid += recorded.invalid;
        self.already_stored += recorded.skipped;
    }

    /// Number of leads classified during this run
    pub fn classified(&self) -> usize {
        self.valid + self.invalid
    }
}

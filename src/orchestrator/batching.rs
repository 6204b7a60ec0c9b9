//! Selecting pending leads and cutting them into batches

use std::collections::HashSet;

use crate::filter::has_email_shape;
use crate::fs::stores::LeadSink;
use crate::models::Lead;

/// Leads still to verify, plus what was set aside while selecting them
#[derive(Debug, Default)]
pub struct PendingLeads<'a> {
    /// Unclassified leads in input order, one per address
    pub leads: Vec<&'a Lead>,
    /// Leads whose email fails the syntax check; never submitted
    pub invalid_local: usize,
    /// Later leads repeating an address already pending
    pub duplicate_local: usize,
}

impl PendingLeads<'_> {
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

/// Select the leads a run still has to submit.
///
/// A lead is pending when its email is in neither output store, has the
/// shape of an address, and is the first lead in the input with that email.
/// Malformed and repeated leads are counted and left out, so a rerun over
/// the same input finds nothing to do once every address is stored.
pub fn pending_leads<'a>(leads: &'a [Lead], sink: &LeadSink) -> PendingLeads<'a> {
    let mut seen = HashSet::new();
    let mut pending = PendingLeads::default();

    for lead in leads {
        let key = lead.key();
        if sink.is_classified(&key) {
            continue;
        }
        if !has_email_shape(&lead.email) {
            pending.invalid_local += 1;
        } else if seen.insert(key) {
            pending.leads.push(lead);
        } else {
            pending.duplicate_local += 1;
        }
    }

    pending
}

/// Split items into consecutive batches of at most `batch_size`.
///
/// A `batch_size` of zero is treated as one.
pub fn partition<T: Clone>(items: &[T], batch_size: usize) -> Vec<Vec<T>> {
    items
        .chunks(batch_size.max(1))
        .map(<[T]>::to_vec)
        .collect()
}

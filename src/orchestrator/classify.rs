//! Routing verdicts to the valid and invalid stores

use std::collections::HashMap;

use crate::models::{normalize_email, Lead, Verdict};

/// Leads addressable by normalized email. The first lead for an email wins.
#[derive(Debug, Default)]
pub struct LeadIndex<'a> {
    by_key: HashMap<String, &'a Lead>,
}

impl<'a> LeadIndex<'a> {
    pub fn from_leads<I>(leads: I) -> Self
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut by_key = HashMap::new();
        for lead in leads {
            by_key.entry(lead.key()).or_insert(lead);
        }
        Self { by_key }
    }

    pub fn get(&self, email: &str) -> Option<&'a Lead> {
        self.by_key.get(&normalize_email(email)).copied()
    }
}

/// Leads split by verdict, ready to be recorded
#[derive(Debug, Default, PartialEq)]
pub struct Classification {
    pub valid: Vec<Lead>,
    pub invalid: Vec<Lead>,
    /// Verdicts whose email matched no lead
    pub unmatched: usize,
}

/// Decide valid/invalid for every verdict that maps back to a lead.
pub fn classify(verdicts: &[(String, Verdict)], index: &LeadIndex<'_>) -> Classification {
    let mut classification = Classification::default();

    for (email, verdict) in verdicts {
        let Some(lead) = index.get(email) else {
            tracing::warn!(email = %email, "Verdict for an email that matches no lead");
            classification.unmatched += 1;
            continue;
        };

        if verdict.is_deliverable() {
            classification.valid.push(lead.clone());
        } else {
            classification.invalid.push(lead.clone());
        }
    }

    classification
}

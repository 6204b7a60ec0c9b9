//! Local cleaning of a batch before it is submitted.
//!
//! Rejects strings that are obviously not addresses and drops repeated
//! addresses so the service is never billed for them.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::models::normalize_email;

/// Permissive `local@domain.tld` shape. Anything stricter is the service's job.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid")
});

/// Result of filtering one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredBatch {
    /// Emails to submit: trimmed, original casing, original order
    pub emails: Vec<String>,
    /// Strings that failed the syntax check
    pub rejected: Vec<String>,
    /// Later occurrences of an already kept address
    pub duplicate_count: usize,
}

impl FilteredBatch {
    pub fn invalid_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Check an address against the permissive syntax rule.
pub fn has_email_shape(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email.trim())
}

/// Filter a batch of raw addresses.
///
/// Comparison uses the normalized form; the first occurrence wins and keeps
/// its original spelling.
pub fn filter_batch<S: AsRef<str>>(raw: &[S]) -> FilteredBatch {
    let mut seen = HashSet::new();
    let mut batch = FilteredBatch::default();

    for email in raw {
        let email = email.as_ref();
        if !has_email_shape(email) {
            batch.rejected.push(email.to_string());
            continue;
        }
        if seen.insert(normalize_email(email)) {
            batch.emails.push(email.trim().to_string());
        } else {
            batch.duplicate_count += 1;
        }
    }

    batch
}

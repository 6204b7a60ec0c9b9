//! Per-email verdicts returned by the verification service

use serde::{Deserialize, Serialize};

/// Outcome the service reports for a single address.
///
/// Every signal is optional. Only an explicit negative signal disqualifies an
/// address; see [`Verdict::is_deliverable`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub is_valid_syntax: Option<bool>,
    #[serde(default)]
    pub is_deliverable: Option<bool>,
    #[serde(default)]
    pub is_disposable: Option<bool>,
    #[serde(default)]
    pub is_spamtrap: Option<bool>,
    #[serde(default)]
    pub is_disabled: Option<bool>,
    #[serde(default)]
    pub is_safe_to_send: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub overall_score: Option<f64>,
}

impl Verdict {
    /// Whether the address should be routed to the valid store.
    ///
    /// Absent fields pass.
    pub fn is_deliverable(&self) -> bool {
        self.is_valid_syntax != Some(false)
            && self.is_deliverable != Some(false)
            && self.is_disposable != Some(true)
            && self.is_spamtrap != Some(true)
            && self.is_disabled != Some(true)
            && self.is_safe_to_send != Some(false)
    }
}

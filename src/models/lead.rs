//! Lead records read from the input list and re-emitted to the output stores

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalize an email address for identity comparison.
///
/// The original string is what gets submitted and stored; this key is only
/// used for lookups and dedup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// An input record identified by its email address.
///
/// Every field other than `email` is carried through untouched, in its
/// original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub email: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Lead {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Identity key: trimmed, lowercased email
    pub fn key(&self) -> String {
        normalize_email(&self.email)
    }
}

//! Loading the input lead list

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::models::Lead;

/// Read the input file: a JSON array of objects that each carry an `email`
/// string. Any problem here is fatal; nothing has been submitted yet.
pub fn load_leads(path: &Path) -> Result<Vec<Lead>> {
    if !path.exists() {
        bail!("Input file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let leads: Vec<Lead> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))?;

    Ok(leads)
}

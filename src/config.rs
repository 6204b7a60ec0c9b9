//! Run settings: defaults, an optional TOML file, then command-line overrides.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::constants::{
    http, DEFAULT_API_BASE_URL, DEFAULT_BATCH_SIZE, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_PROBE_TIMEOUT_SECS, MAX_BATCH_SIZE,
};
use crate::orchestrator::RunConfig;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_base_url: String,
    pub batch_size: usize,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
    pub probe_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub task_name_prefix: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            output_dir: PathBuf::from("output"),
            task_name_prefix: "leadsift".to_string(),
            request_timeout_secs: http::REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: http::CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Values given on the command line; `None` keeps the file or default value
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub batch_size: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub poll_interval_secs: Option<u64>,
    pub poll_timeout_secs: Option<u64>,
    pub probe_timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from a TOML file, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn apply(mut self, overrides: &SettingsOverrides) -> Self {
        self.batch_size = overrides.batch_size.unwrap_or(self.batch_size);
        self.output_dir = overrides
            .output_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.clone());
        self.poll_interval_secs = overrides
            .poll_interval_secs
            .unwrap_or(self.poll_interval_secs);
        self.poll_timeout_secs = overrides.poll_timeout_secs.unwrap_or(self.poll_timeout_secs);
        self.probe_timeout_secs = overrides
            .probe_timeout_secs
            .unwrap_or(self.probe_timeout_secs);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            bail!(
                "batch_size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            );
        }
        if self.poll_timeout_secs == 0 {
            bail!("poll_timeout_secs must be greater than zero");
        }
        if self.probe_timeout_secs == 0 {
            bail!("probe_timeout_secs must be greater than zero");
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            bail!("HTTP timeouts must be greater than zero");
        }
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url cannot be empty");
        }
        Ok(())
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            batch_size: self.batch_size,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            poll_timeout: Duration::from_secs(self.poll_timeout_secs),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            task_name_prefix: self.task_name_prefix.clone(),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Resolve the API key, rejecting a missing or blank value.
pub fn require_api_key(api_key: Option<&str>) -> Result<String> {
    match api_key.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => bail!(
            "Missing API key. Pass --api-key or set {}",
            crate::models::constants::API_KEY_ENV
        ),
    }
}

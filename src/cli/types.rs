use clap::{Args, Parser, Subcommand};
use leadsift::config::SettingsOverrides;
use leadsift::models::constants::API_KEY_ENV;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leadsift")]
#[command(about = "Resumable bulk email verification for lead lists", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API key for the verification service
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify every lead not yet in the valid or invalid store
    Run {
        /// JSON array of lead objects, each with an "email" field
        input: PathBuf,

        #[command(flatten)]
        tuning: RunArgs,
    },

    /// Show stores, pending work and the in-flight task (no API calls)
    Status {
        /// Input file, to count pending leads
        input: Option<PathBuf>,

        /// Directory holding the stores and checkpoint
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Batch size used to preview the batch count
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Inspect or clear the in-flight task checkpoint
    Checkpoint {
        #[command(subcommand)]
        command: CheckpointCommands,

        /// Directory holding the stores and checkpoint
        #[arg(short, long, global = true)]
        output_dir: Option<PathBuf>,
    },

    /// Show remaining verification credits
    Balance,
}

#[derive(Args)]
pub struct RunArgs {
    /// Emails per verification task
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Directory holding the stores and checkpoint
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Seconds between result polls
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Seconds to wait for a submitted batch before giving up on it
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Seconds to probe a checkpointed task on startup
    #[arg(long)]
    pub probe_timeout: Option<u64>,
}

impl RunArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            batch_size: self.batch_size,
            output_dir: self.output_dir.clone(),
            poll_interval_secs: self.poll_interval,
            poll_timeout_secs: self.timeout,
            probe_timeout_secs: self.probe_timeout,
        }
    }
}

#[derive(Subcommand)]
pub enum CheckpointCommands {
    /// Show the recorded in-flight task
    Show,
    /// Delete the checkpoint so the next run resubmits its emails
    Clear,
}

//! Checkpoint command implementation
//!
//! Usage: leadsift checkpoint show | leadsift checkpoint clear

use anyhow::Result;
use colored::Colorize;

use crate::config::Settings;
use crate::fs::{CheckpointSlot, OutputDir};
use crate::models::TaskCheckpoint;

fn slot(settings: &Settings) -> CheckpointSlot {
    CheckpointSlot::new(OutputDir::new(&settings.output_dir).checkpoint_path())
}

/// Print the in-flight task recorded by the last run, if any
pub fn show(settings: &Settings) -> Result<()> {
    let slot = slot(settings);
    match slot.load()? {
        Some(checkpoint) => print_checkpoint(&checkpoint),
        None if slot.exists() => println!(
            "{} {} exists but cannot be read",
            "⚠".yellow(),
            slot.path().display()
        ),
        None => println!("No checkpoint. The next run starts fresh."),
    }
    Ok(())
}

/// Delete the checkpoint so the next run stops waiting on its task.
///
/// Emails of the abandoned task are not in either store, so the next run
/// submits them again.
pub fn clear(settings: &Settings) -> Result<()> {
    let slot = slot(settings);
    let checkpoint = slot.load()?;

    if slot.clear()? {
        match checkpoint {
            Some(checkpoint) => println!(
                "✓ Cleared checkpoint for task {} (batch {}, {} emails)",
                checkpoint.task_id,
                checkpoint.batch_label(),
                checkpoint.email_count
            ),
            None => println!("✓ Removed unreadable checkpoint {}", slot.path().display()),
        }
    } else {
        println!("No checkpoint to clear.");
    }
    Ok(())
}

pub(crate) fn print_checkpoint(checkpoint: &TaskCheckpoint) {
    println!("{}", "In-flight task".bold());
    println!("  Task ID:  {}", checkpoint.task_id);
    println!("  Batch:    {}", checkpoint.batch_label());
    println!("  Emails:   {}", checkpoint.email_count);
    println!("  Status:   {}", checkpoint.status);
    println!(
        "  Created:  {}",
        checkpoint.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

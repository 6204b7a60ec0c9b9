use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::checkpoint::print_checkpoint;
use crate::config::Settings;
use crate::fs::{load_leads, CheckpointSlot, LeadSink, OutputDir};
use crate::orchestrator::{partition, pending_leads};

/// Show store sizes, the checkpoint and, given the input, what a run would do.
/// Makes no API calls.
pub fn execute(input: Option<&Path>, settings: &Settings) -> Result<()> {
    settings.validate()?;
    let output = OutputDir::new(&settings.output_dir);
    let sink = LeadSink::open(&output)?;

    println!("{}", "leadsift Status".bold().blue());
    println!("{}", "=".repeat(50));

    println!("\n{}", "Stores".bold());
    println!(
        "  Valid:    {}",
        sink.valid_store().load()?.len().to_string().green()
    );
    println!(
        "  Invalid:  {}",
        sink.invalid_store().load()?.len().to_string().red()
    );
    println!("  Output:   {}", output.root().display());

    if let Some(input) = input {
        let leads = load_leads(input)?;
        let pending = pending_leads(&leads, &sink);
        let batches = partition(&pending.leads, settings.batch_size).len();

        println!("\n{}", "Input".bold());
        println!("  Leads:    {}", leads.len());
        println!("  Pending:  {}", pending.len());
        if pending.invalid_local > 0 || pending.duplicate_local > 0 {
            println!(
                "  Skipped:  {} malformed, {} repeated",
                pending.invalid_local, pending.duplicate_local
            );
        }
        println!(
            "  Batches:  {batches} (batch size {})",
            settings.batch_size
        );
    }

    println!();
    let slot = CheckpointSlot::new(output.checkpoint_path());
    match slot.load()? {
        Some(checkpoint) => {
            print_checkpoint(&checkpoint);
            println!(
                "\nThe next run will probe task {} before submitting anything.",
                checkpoint.task_id
            );
        }
        None if slot.exists() => println!(
            "{} Checkpoint file {} is unreadable and will be ignored",
            "⚠".yellow(),
            slot.path().display()
        ),
        None => println!("No task in flight."),
    }

    println!();
    Ok(())
}

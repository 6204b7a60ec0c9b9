use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::http_client;
use crate::config::Settings;
use crate::fs::{load_leads, OutputDir};
use crate::orchestrator::{BatchOrchestrator, RunSummary};

/// Verify every pending lead in `input`
/// Usage: leadsift run <input> [--batch-size <n>] [--output-dir <dir>]
pub fn execute(input: &Path, settings: &Settings, api_key: Option<&str>) -> Result<()> {
    // 1. Everything that can be checked locally is checked before the API is contacted
    settings.validate()?;
    let leads = load_leads(input)?;
    let client = http_client(settings, api_key)?;

    // 2. Run the batch loop
    let output = OutputDir::new(&settings.output_dir);
    let mut orchestrator = BatchOrchestrator::new(&client, settings.run_config(), &output)?;
    let summary = orchestrator.run(&leads)?;

    // 3. Print results
    print_summary(&summary, leads.len(), &output);
    Ok(())
}

fn print_summary(summary: &RunSummary, total_leads: usize, output: &OutputDir) {
    println!("\n{}", "=== Verification Complete ===".bold());

    if let Some(task_id) = &summary.resumed_task {
        println!("↻ Recovered results of task {task_id} from the previous run");
    }
    if let Some(discarded) = &summary.discarded_task {
        println!(
            "{} Dropped the previous run's checkpoint for task {discarded}",
            "⚠".yellow()
        );
    }

    if summary.pending == 0 {
        println!(
            "✓ All {total_leads} leads were already classified, nothing to submit"
        );
    } else {
        println!(
            "Batches: {} completed, {} failed, {} skipped (of {})",
            summary.batches_completed.to_string().green(),
            summary.batches_failed.to_string().red(),
            summary.batches_skipped,
            summary.batches_total
        );
    }

    println!("\n{}", "Results".bold());
    println!("  Valid:                     {}", summary.valid.to_string().green());
    println!("  Invalid:                   {}", summary.invalid.to_string().red());
    println!("  Duplicates (service):      {}", summary.duplicates_removed_by_service);
    println!("  Rejected (service):        {}", summary.rejected_by_service);
    println!("  Malformed (local):         {}", summary.invalid_local);
    println!("  Duplicates (local):        {}", summary.duplicate_local);
    if summary.already_stored > 0 {
        println!("  Already stored, skipped:   {}", summary.already_stored);
    }

    println!("\nValid leads:   {}", output.valid_store_path().display());
    println!("Invalid leads: {}", output.invalid_store_path().display());

    if summary.batches_failed > 0 {
        println!(
            "\n{} {} batch(es) failed. Run again to retry the remaining leads.",
            "⚠".yellow(),
            summary.batches_failed
        );
    }
}

//! Rerunning over the same input and output directory

use leadsift::models::Lead;
use leadsift::orchestrator::BatchOrchestrator;
use tempfile::TempDir;

use super::helpers::*;

#[test]
fn test_second_run_makes_no_api_calls() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let leads = numbered_leads(25);

    let first = MockService::new();
    BatchOrchestrator::new(&first, fast_config(10), &output)
        .unwrap()
        .run(&leads)
        .unwrap();
    assert_eq!(first.created().len(), 3);

    let second = MockService::new();
    let summary = BatchOrchestrator::new(&second, fast_config(10), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(second.total_calls(), 0);
    assert_eq!(summary.pending, 0);
    assert_eq!(summary.classified(), 0);
    assert_eq!(stored_valid(&output).len(), 25);
}

#[test]
fn test_second_run_with_malformed_lead_makes_no_api_calls() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let leads = vec![Lead::new("good@example.com"), Lead::new("not-an-email")];

    let first = MockService::new();
    let summary = BatchOrchestrator::new(&first, fast_config(10), &output)
        .unwrap()
        .run(&leads)
        .unwrap();
    assert_eq!(first.created(), vec![vec!["good@example.com"]]);
    assert_eq!(summary.invalid_local, 1);

    let second = MockService::new();
    let summary = BatchOrchestrator::new(&second, fast_config(10), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(second.total_calls(), 0);
    assert_eq!(summary.pending, 0);
    assert!(stored_invalid(&output).is_empty());
}

#[test]
fn test_rerun_submits_only_what_is_left() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let leads = numbered_leads(30);

    let first = MockService::new().fail_create(1);
    BatchOrchestrator::new(&first, fast_config(10), &output)
        .unwrap()
        .run(&leads)
        .unwrap();
    assert_eq!(stored_valid(&output).len(), 20);

    let second = MockService::new();
    let summary = BatchOrchestrator::new(&second, fast_config(10), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(second.created(), vec![emails_of(&leads[10..20])]);
    assert!(second.task_names()[0].starts_with("test batch 1/1 "));
    assert_eq!(summary.pending, 10);
    assert_eq!(summary.valid, 10);
    assert_eq!(stored_valid(&output).len(), 30);
}

#[test]
fn test_case_variants_of_stored_emails_are_not_pending() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);

    let first = MockService::new();
    BatchOrchestrator::new(&first, fast_config(10), &output)
        .unwrap()
        .run(&numbered_leads(5))
        .unwrap();

    let mut shouted = numbered_leads(5);
    for lead in &mut shouted {
        lead.email = format!(" {} ", lead.email.to_uppercase());
    }

    let second = MockService::new();
    let summary = BatchOrchestrator::new(&second, fast_config(10), &output)
        .unwrap()
        .run(&shouted)
        .unwrap();

    assert_eq!(second.total_calls(), 0);
    assert_eq!(summary.pending, 0);
}

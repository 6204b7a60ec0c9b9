//! Batching, local filtering and classification over a full run

use std::time::Duration;

use leadsift::models::Lead;
use leadsift::orchestrator::BatchOrchestrator;
use serde_json::json;
use tempfile::TempDir;

use super::helpers::*;

#[test]
fn test_leads_are_submitted_in_sequential_batches() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let service = MockService::new();
    let leads = numbered_leads(250);

    let summary = BatchOrchestrator::new(&service, fast_config(100), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    let created = service.created();
    let sizes: Vec<usize> = created.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(created[0][0], "user0@example.com");
    assert_eq!(created[2][49], "user249@example.com");

    let names = service.task_names();
    assert!(names[0].starts_with("test batch 1/3 "));
    assert!(names[2].starts_with("test batch 3/3 "));

    assert_eq!(summary.batches_total, 3);
    assert_eq!(summary.batches_completed, 3);
    assert_eq!(summary.valid, 250);
    assert_eq!(stored_valid(&output).len(), 250);
    assert!(!checkpoint_slot(&output).exists());
}

#[test]
fn test_local_filter_runs_before_submission() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let service = MockService::new();
    let leads: Vec<Lead> = ["a@b.com", "A@B.com", "not-an-email", "c@d.com"]
        .into_iter()
        .map(Lead::new)
        .collect();

    let summary = BatchOrchestrator::new(&service, fast_config(10), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(service.created(), vec![vec!["a@b.com", "c@d.com"]]);
    assert_eq!(summary.duplicate_local, 1);
    assert_eq!(summary.invalid_local, 1);
    assert_eq!(summary.valid, 2);

    // Neither the duplicate nor the malformed string is stored anywhere
    let valid = stored_valid(&output);
    assert_eq!(valid.len(), 2);
    assert_eq!(valid[0].email, "a@b.com");
    assert!(stored_invalid(&output).is_empty());
}

#[test]
fn test_verdicts_split_leads_and_keep_extra_fields() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let service = MockService::new();
    let leads = vec![
        Lead::new("good@example.com").with_field("name", json!("Ada")),
        Lead::new("bad@example.com").with_field("name", json!("Bob")),
        Lead::new("trap@example.com").with_field("company", json!({"size": 3})),
        Lead::new("Mixed.Case@Example.com").with_field("name", json!("Cy")),
    ];

    let summary = BatchOrchestrator::new(&service, fast_config(100), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(summary.valid, 2);
    assert_eq!(summary.invalid, 2);
    assert_eq!(summary.unmatched, 0);

    let valid = stored_valid(&output);
    let emails: Vec<&str> = valid.iter().map(|lead| lead.email.as_str()).collect();
    assert_eq!(emails, vec!["good@example.com", "Mixed.Case@Example.com"]);
    assert_eq!(valid[0].fields["name"], json!("Ada"));

    let invalid = stored_invalid(&output);
    assert_eq!(invalid.len(), 2);
    assert_eq!(invalid[0], leads[1]);
    assert_eq!(invalid[1].fields["company"], json!({"size": 3}));
}

#[test]
fn test_failed_submission_skips_only_that_batch() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let service = MockService::new().fail_create(1);
    let leads = numbered_leads(30);

    let summary = BatchOrchestrator::new(&service, fast_config(10), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(service.task_names().len(), 3);
    assert_eq!(summary.batches_failed, 1);
    assert_eq!(summary.batches_completed, 2);
    assert_eq!(summary.valid, 20);

    let stored = stored_valid(&output);
    assert!(stored.iter().all(|lead| lead.email != "user15@example.com"));
    assert!(!checkpoint_slot(&output).exists());
}

#[test]
fn test_poll_timeout_skips_batch_and_continues() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let service = MockService::new().stall_create(0);
    let leads = numbered_leads(20);
    let mut config = fast_config(10);
    config.poll_timeout = Duration::ZERO;

    let summary = BatchOrchestrator::new(&service, config, &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(summary.batches_failed, 1);
    assert_eq!(summary.batches_completed, 1);
    assert_eq!(summary.valid, 10);

    // The next submission took over the checkpoint slot and cleared it
    let checkpoint = checkpoint_slot(&output).load().unwrap();
    assert!(checkpoint.is_none());
}

#[test]
fn test_trailing_poll_timeout_leaves_checkpoint() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let service = MockService::new().stall_create(1);
    let leads = numbered_leads(20);
    let mut config = fast_config(10);
    config.poll_timeout = Duration::ZERO;

    let summary = BatchOrchestrator::new(&service, config, &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(summary.batches_failed, 1);
    let checkpoint = checkpoint_slot(&output).load().unwrap().unwrap();
    assert_eq!(checkpoint.task_id, "task-2");
    assert_eq!(checkpoint.batch_index, 1);
    assert_eq!(checkpoint.total_batches, 2);
    assert_eq!(checkpoint.emails, emails_of(&leads[10..]));
}

#[test]
fn test_malformed_leads_never_reach_a_batch() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let service = MockService::new();
    let mut leads: Vec<Lead> = (0..3).map(|i| Lead::new(format!("junk-{i}"))).collect();
    leads.extend(numbered_leads(3));

    let summary = BatchOrchestrator::new(&service, fast_config(3), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(service.created(), vec![emails_of(&leads[3..])]);
    assert!(service.task_names()[0].starts_with("test batch 1/1 "));
    assert_eq!(summary.batches_skipped, 0);
    assert_eq!(summary.invalid_local, 3);
    assert_eq!(summary.pending, 3);
    assert_eq!(summary.valid, 3);
}

#[test]
fn test_repeated_address_across_batches_is_submitted_once() {
    let temp = TempDir::new().unwrap();
    let output = output_in(&temp);
    let service = MockService::new();
    let leads: Vec<Lead> = ["a@example.com", "b@example.com", "A@example.com"]
        .into_iter()
        .map(Lead::new)
        .collect();

    let summary = BatchOrchestrator::new(&service, fast_config(2), &output)
        .unwrap()
        .run(&leads)
        .unwrap();

    assert_eq!(service.created(), vec![vec!["a@example.com", "b@example.com"]]);
    assert_eq!(summary.duplicate_local, 1);
    assert_eq!(summary.already_stored, 0);
    assert_eq!(summary.batches_total, 1);
    assert_eq!(stored_valid(&output).len(), 2);
}

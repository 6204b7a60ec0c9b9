//! Integration tests for leadsift runs
//!
//! These tests drive the batch orchestrator end to end against an in-memory
//! verification service, covering batching, classification, idempotent
//! reruns and checkpoint recovery.

pub mod batch_flow;
pub mod helpers;
pub mod idempotence;

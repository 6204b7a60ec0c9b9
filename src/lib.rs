pub mod client;
pub mod commands;
pub mod config;
pub mod filter;
pub mod fs;
pub mod models;
pub mod orchestrator;

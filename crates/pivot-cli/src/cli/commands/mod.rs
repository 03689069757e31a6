//! CLI command handlers.

pub mod careers;
pub mod config;

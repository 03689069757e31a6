//! Core pivot library (API client, taxonomy, chart extraction, config, logging).

pub mod api;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod logging;

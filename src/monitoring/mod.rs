//! Monitoring module for pdf-sectioner
//!
//! Provides:
//! - Structured logging with tracing
//! - Per-request chunking snapshots served at /monitoring/chunking/latest

pub mod chunking_stats;
pub mod config;
pub mod tracing_config;

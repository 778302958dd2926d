//! Core infrastructure for repository processing
//!
//! This module provides:
//! - Run configuration and constants
//! - Repository discovery and the filter pipeline
//! - Bounded-parallel task orchestration
//! - Progress reporting and result aggregation

pub mod aggregator;
pub mod config;
pub mod discovery;
pub mod filter;
pub mod orchestrator;
pub mod progress;

// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;

//! Error handling and probe statistics.
//!
//! This module provides:
//! - Error type definitions ([`ChainError`], [`InitializationError`])
//! - Probe statistics tracking (errors and info metrics)
//! - Error categorization for the statistics counters
//!
//! Counters are categorized into:
//! - **Errors**: Terminal hop failures that ended a chain resolution
//! - **Info**: Notable events (HEAD fallbacks, policy skips, truncations)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_chain_error, update_error_stats};
pub use stats::ProbeStats;
pub use types::{ChainError, ErrorType, InfoType, InitializationError};

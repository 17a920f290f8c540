//! Application support modules.
//!
//! This module provides URL validation, output rendering, progress logging,
//! shutdown handling, and statistics printing used by the batch runner.

pub mod logging;
pub mod output;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::log_progress;
pub use output::ChainRecord;
pub use shutdown::shutdown_gracefully;
pub use statistics::print_probe_statistics;
pub use url::{is_valid_url, validate_and_normalize_url};

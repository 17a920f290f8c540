//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - The redirect-disabled HTTP client
//! - The logger
//! - The concurrency semaphore used by the batch runner

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_redirect_client;
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// A count of zero is raised to one so the batch runner always makes progress.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}

//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs progress information about chain resolution.
///
/// # Arguments
///
/// * `start_time` - The start time of the run
/// * `resolved` - Counter of chains resolved successfully
/// * `failed` - Counter of chains that failed
pub fn log_progress(start_time: std::time::Instant, resolved: &AtomicUsize, failed: &AtomicUsize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let resolved = resolved.load(Ordering::SeqCst);
    let failed = failed.load(Ordering::SeqCst);
    let done = resolved + failed;
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Resolved {} URLs ({} failed) in {:.2} seconds (~{:.2} URLs/sec)",
        done, failed, elapsed_secs, rate
    );
}

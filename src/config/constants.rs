//! Configuration constants.
//!
//! This module defines the defaults used throughout the crate: chain limits,
//! probe deadlines, input limits and the seed list of hosts that reject HEAD.

use std::time::Duration;

// Chain resolution
/// Maximum number of URLs in a resolved chain (including the starting URL).
/// Matches the redirect cap browsers commonly apply.
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 20;

// Probe deadlines
/// Hard deadline for the lightweight HEAD probe.
/// When it elapses the probe falls back to a GET instead of failing the hop.
pub const HEAD_PROBE_TIMEOUT: Duration = Duration::from_millis(3000);
/// Deadline for the GET fallback request.
/// A GET that exceeds this fails the hop.
pub const FALLBACK_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Hosts known to answer HEAD with non-standard or missing responses.
///
/// Requests to these hosts skip the HEAD probe and go straight to GET.
/// The list seeds [`crate::DomainPolicy::default`] and the process-wide table.
pub const DEFAULT_NO_HEAD_DOMAINS: &[&str] = &["mega.nz", "mega.co.nz", "mega.io"];

/// Default User-Agent string for probe requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("redirect_chain/", env!("CARGO_PKG_VERSION"));

// Batch runner
/// Maximum number of chains resolved concurrently by the batch runner
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
/// Progress logging interval in seconds
pub const LOGGING_INTERVAL: u64 = 5;

/// Maximum URL length (2048 characters) accepted from input.
/// Matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

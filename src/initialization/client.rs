//! HTTP client initialization.
//!
//! This module builds the HTTP client used for probing. Redirects are
//! disabled so every hop can be observed.

use crate::config::Config;
use reqwest::ClientBuilder;

/// Initializes the HTTP client for redirect resolution.
///
/// Creates a `reqwest::Client` with:
/// - Redirect following disabled (each hop is probed manually)
/// - User-Agent header from the configuration
///
/// No client-wide timeout is set: each probe applies its own HEAD or GET
/// deadline from [`ProbeSettings`](crate::ProbeSettings).
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(config.user_agent.clone())
        .build()
}

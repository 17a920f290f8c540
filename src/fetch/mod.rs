//! Redirect probing and chain resolution.
//!
//! - [`RedirectResolver::probe`] asks a single URL for its redirect target,
//!   trying HEAD first and falling back to GET.
//! - [`RedirectResolver::resolve`] walks the chain hop by hop and bounds its
//!   length.
//!
//! The free functions [`get_location_header`] and [`get_redirect_chain`] run
//! the same logic against the process-wide [`DomainPolicy`] with default
//! probe settings.

mod context;
mod probe;
mod redirects;
mod request;

use reqwest::Url;

use crate::error_handling::ChainError;
use crate::policy::DomainPolicy;

pub use context::{ProbeSettings, RedirectResolver};
pub use probe::ProbeOutcome;
pub use redirects::{resolve_redirect_target, ResolvedChain};

/// Returns the raw `Location` header of `url`, or `None` when it does not redirect.
///
/// Uses the global no-HEAD table and default deadlines. `client` must have
/// automatic redirects disabled.
///
/// # Errors
///
/// Returns a [`ChainError`] when the GET fallback fails, the status is 4xx/5xx,
/// or the header is unreadable.
pub async fn get_location_header(
    client: &reqwest::Client,
    url: &Url,
) -> Result<Option<String>, ChainError> {
    RedirectResolver::new(client.clone(), DomainPolicy::global())
        .location_header(url)
        .await
}

/// Returns the ordered URLs `url` passes through, capped at `max_chain_length`.
///
/// Uses the global no-HEAD table and default deadlines. `client` must have
/// automatic redirects disabled.
///
/// # Errors
///
/// Any terminal hop failure fails the whole resolution.
pub async fn get_redirect_chain(
    client: &reqwest::Client,
    url: &Url,
    max_chain_length: usize,
) -> Result<Vec<Url>, ChainError> {
    RedirectResolver::new(client.clone(), DomainPolicy::global())
        .redirect_chain(url, max_chain_length)
        .await
}

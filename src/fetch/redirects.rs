//! HTTP redirect chain resolution.
//!
//! This module walks redirect chains manually, one probe per hop, to record
//! the full path from the initial URL to its final destination.

use log::debug;
use reqwest::Url;

use crate::error_handling::{ChainError, InfoType};
use crate::fetch::context::RedirectResolver;
use crate::fetch::probe::ProbeOutcome;

/// A resolved chain together with whether it hit the length cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    /// Visited URLs in order; the first element is the starting URL
    pub urls: Vec<Url>,
    /// `true` when the walk stopped at the maximum length while the last hop
    /// still redirected
    pub truncated: bool,
}

impl ResolvedChain {
    /// The last URL of the chain, if any.
    pub fn final_url(&self) -> Option<&Url> {
        self.urls.last()
    }

    /// Number of redirects followed (chain length minus one).
    pub fn hops(&self) -> usize {
        self.urls.len().saturating_sub(1)
    }
}

/// Resolves a raw `Location` value against the URL that sent it.
///
/// Targets starting with `/` are resolved against `current`, keeping its
/// scheme, host and port. Anything else must be an absolute URL.
///
/// # Errors
///
/// Returns the parser error when the target is not a valid URL. Relative
/// targets without a leading slash (`next`, `../x`) are rejected.
pub fn resolve_redirect_target(current: &Url, target: &str) -> Result<Url, url::ParseError> {
    if target.starts_with('/') {
        current.join(target)
    } else {
        Url::parse(target)
    }
}

impl RedirectResolver {
    /// Walks the redirect chain of `start_url`.
    ///
    /// The walk stops when a hop does not redirect, or when `max_chain_length`
    /// URLs have been collected (silent truncation, flagged in the result).
    ///
    /// # Errors
    ///
    /// Any terminal hop failure fails the whole walk; no partial chain is
    /// returned.
    pub async fn resolve(
        &self,
        start_url: &Url,
        max_chain_length: usize,
    ) -> Result<ResolvedChain, ChainError> {
        let mut chain: Vec<Url> = Vec::new();
        let mut current = start_url.clone();

        while chain.len() < max_chain_length {
            chain.push(current.clone());

            let target = match self.probe(&current).await? {
                ProbeOutcome::NoRedirect => {
                    return Ok(ResolvedChain {
                        urls: chain,
                        truncated: false,
                    });
                }
                ProbeOutcome::Redirect(target) => target,
            };

            let next = match resolve_redirect_target(&current, &target) {
                Ok(next) => next,
                Err(source) => {
                    let error = ChainError::InvalidLocation {
                        url: current,
                        location: target,
                        source,
                    };
                    self.record_error(&error);
                    return Err(error);
                }
            };

            self.record_info(InfoType::RedirectFollowed);
            current = next;
        }

        let truncated = !chain.is_empty();
        if truncated {
            debug!(
                "Redirect chain for {start_url} truncated at {} URLs",
                max_chain_length
            );
            self.record_info(InfoType::ChainTruncated);
        }
        Ok(ResolvedChain {
            urls: chain,
            truncated,
        })
    }

    /// Returns the ordered list of URLs `start_url` passes through.
    ///
    /// The first element is always `start_url`; the length never exceeds
    /// `max_chain_length`.
    ///
    /// # Errors
    ///
    /// Same as [`RedirectResolver::resolve`].
    pub async fn redirect_chain(
        &self,
        start_url: &Url,
        max_chain_length: usize,
    ) -> Result<Vec<Url>, ChainError> {
        self.resolve(start_url, max_chain_length)
            .await
            .map(|resolved| resolved.urls)
    }
}

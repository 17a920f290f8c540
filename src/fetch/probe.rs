//! Single-hop probing.
//!
//! A probe asks one URL whether it redirects. It first tries a HEAD request
//! with a short deadline; if that yields no usable response (skipped by the
//! domain policy, timed out, transport error, or method rejected) it issues a
//! GET with auto-follow disabled. At most two requests are made per probe.

use log::debug;
use reqwest::header::LOCATION;
use reqwest::{Response, StatusCode, Url};

use crate::config::TransportFailureMode;
use crate::error_handling::{ChainError, InfoType};
use crate::fetch::context::RedirectResolver;
use crate::fetch::request::send_with_deadline;

/// Result of a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The response carried a `Location` header (raw value, may be relative).
    Redirect(String),
    /// The response had no `Location` header; the chain ends here.
    NoRedirect,
}

/// Why the HEAD step produced no response.
#[derive(Debug)]
pub(crate) enum NoResponse {
    /// Host is listed in the domain policy table
    SkippedByPolicy,
    /// HEAD exceeded its deadline
    TimedOut,
    /// HEAD failed at the transport level
    Failed(reqwest::Error),
    /// Server refused the HEAD method (405 / 501)
    Rejected(StatusCode),
}

/// Outcome of the HEAD step.
#[derive(Debug)]
pub(crate) enum HeadOutcome {
    GotResponse(Response),
    NoResponse(NoResponse),
}

/// Statuses that mean "this server does not do HEAD", not "this URL is broken".
fn is_head_rejection(status: StatusCode) -> bool {
    status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED
}

/// 1xx, 2xx and 3xx are acceptable: with manual redirects, 3xx is the normal
/// answer of a redirecting hop.
fn is_acceptable_status(status: StatusCode) -> bool {
    !(status.is_client_error() || status.is_server_error())
}

/// Extracts the raw `Location` header from a response.
///
/// Returns `Ok(None)` when the header is absent and an error when it is not
/// valid UTF-8. Raw non-ASCII targets are kept as-is; URL parsing
/// percent-encodes them when the target is resolved.
pub(crate) fn extract_location(url: &Url, response: &Response) -> Result<Option<String>, ChainError> {
    match response.headers().get(LOCATION) {
        None => Ok(None),
        Some(value) => std::str::from_utf8(value.as_bytes())
            .map(|loc| Some(loc.to_string()))
            .map_err(|_| ChainError::UnreadableLocation { url: url.clone() }),
    }
}

impl RedirectResolver {
    /// HEAD step: never fails, reports why no response was obtained instead.
    pub(crate) async fn lightweight_probe(&self, url: &Url) -> HeadOutcome {
        if self.policy.skips_head(url) {
            return HeadOutcome::NoResponse(NoResponse::SkippedByPolicy);
        }

        let request = self.client.head(url.clone());
        match send_with_deadline(request, self.settings.head_timeout).await {
            Err(_) => HeadOutcome::NoResponse(NoResponse::TimedOut),
            Ok(Err(e)) => HeadOutcome::NoResponse(NoResponse::Failed(e)),
            Ok(Ok(response)) if is_head_rejection(response.status()) => {
                HeadOutcome::NoResponse(NoResponse::Rejected(response.status()))
            }
            Ok(Ok(response)) => HeadOutcome::GotResponse(response),
        }
    }

    /// GET step: a failure here is terminal for the hop.
    async fn fallback_request(&self, url: &Url) -> Result<Response, ChainError> {
        let request = self.client.get(url.clone());
        match send_with_deadline(request, self.settings.fallback_timeout).await {
            Err(_) => Err(ChainError::Timeout {
                url: url.clone(),
                timeout: self.settings.fallback_timeout,
            }),
            Ok(Err(source)) => Err(ChainError::Transport {
                url: url.clone(),
                source,
            }),
            Ok(Ok(response)) => Ok(response),
        }
    }

    /// Probes `url` once and reports its redirect target, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainError`] when the GET fallback fails (unless the
    /// resolver runs in [`TransportFailureMode::EndChain`]), when the response
    /// status is 4xx/5xx, or when the `Location` header is unreadable.
    pub async fn probe(&self, url: &Url) -> Result<ProbeOutcome, ChainError> {
        let result = self.probe_inner(url).await;
        if let Err(e) = &result {
            self.record_error(e);
        }
        result
    }

    async fn probe_inner(&self, url: &Url) -> Result<ProbeOutcome, ChainError> {
        let response = match self.lightweight_probe(url).await {
            HeadOutcome::GotResponse(response) => response,
            HeadOutcome::NoResponse(reason) => {
                match &reason {
                    NoResponse::SkippedByPolicy => {
                        debug!("Skipping HEAD for {url}: host is in the no-HEAD policy table");
                        self.record_info(InfoType::HeadProbeSkipped);
                    }
                    NoResponse::TimedOut => {
                        debug!(
                            "HEAD for {url} timed out after {:?}, falling back to GET",
                            self.settings.head_timeout
                        );
                        self.record_info(InfoType::HeadProbeTimeout);
                    }
                    NoResponse::Failed(e) => {
                        debug!("HEAD for {url} failed ({e}), falling back to GET");
                        self.record_info(InfoType::HeadProbeFallback);
                    }
                    NoResponse::Rejected(status) => {
                        debug!("HEAD for {url} rejected with {status}, falling back to GET");
                        self.record_info(InfoType::HeadProbeFallback);
                    }
                }

                match self.fallback_request(url).await {
                    Ok(response) => response,
                    Err(e)
                        if e.is_transport()
                            && self.settings.transport_failure
                                == TransportFailureMode::EndChain =>
                    {
                        debug!("Ending chain at {url}: {e}");
                        self.record_info(InfoType::ChainEndedOnTransportFailure);
                        return Ok(ProbeOutcome::NoRedirect);
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        let status = response.status();
        if !is_acceptable_status(status) {
            return Err(ChainError::HttpStatus {
                url: url.clone(),
                status,
            });
        }

        match extract_location(url, &response)? {
            Some(location) => {
                debug!("{url} ({status}) -> {location}");
                Ok(ProbeOutcome::Redirect(location))
            }
            None => {
                debug!("{url} ({status}) has no Location header");
                Ok(ProbeOutcome::NoRedirect)
            }
        }
    }

    /// Returns the raw `Location` header of `url`, or `None` when it does not redirect.
    ///
    /// # Errors
    ///
    /// Same as [`RedirectResolver::probe`].
    pub async fn location_header(&self, url: &Url) -> Result<Option<String>, ChainError> {
        Ok(match self.probe(url).await? {
            ProbeOutcome::Redirect(location) => Some(location),
            ProbeOutcome::NoRedirect => None,
        })
    }
}

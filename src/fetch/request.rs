//! HTTP request building for probes.
//!
//! Probe requests carry a small set of ordinary browser headers. Some servers
//! answer bare clients with a different redirect (or none at all), so the
//! probes look like a regular navigation without fetching more than needed.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use tokio::time::error::Elapsed;

/// Standard headers attached to every probe request.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Accept header sent with probes.
    pub(crate) const ACCEPT: &'static str =
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
    /// Accept-Language header sent with probes.
    pub(crate) const ACCEPT_LANGUAGE: &'static str = "en-US,en;q=0.9";

    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(reqwest::header::ACCEPT, Self::ACCEPT)
            .header(reqwest::header::ACCEPT_LANGUAGE, Self::ACCEPT_LANGUAGE)
    }
}

/// Sends `builder` and waits at most `deadline` for the response headers.
///
/// The deadline timer is owned by the returned future: it is dropped as soon
/// as the response arrives, so it can never fire after this call returns.
pub(crate) async fn send_with_deadline(
    builder: RequestBuilder,
    deadline: Duration,
) -> Result<Result<Response, reqwest::Error>, Elapsed> {
    tokio::time::timeout(deadline, RequestHeaders::apply_to_request_builder(builder).send()).await
}

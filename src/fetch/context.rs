//! Resolver context.
//!
//! This module defines [`RedirectResolver`], which groups the shared resources
//! a chain resolution needs: the redirect-disabled HTTP client, the domain
//! policy table, the probe deadlines and an optional statistics tracker.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{
    Config, TransportFailureMode, FALLBACK_REQUEST_TIMEOUT, HEAD_PROBE_TIMEOUT,
};
use crate::error_handling::{update_error_stats, ChainError, InfoType, ProbeStats};
use crate::policy::DomainPolicy;

/// Deadlines and failure handling for a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Deadline for the HEAD probe; on expiry the probe falls back to GET
    pub head_timeout: Duration,
    /// Deadline for the GET fallback; on expiry the hop fails
    pub fallback_timeout: Duration,
    /// What a transport-level GET failure does to the chain
    pub transport_failure: TransportFailureMode,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            head_timeout: HEAD_PROBE_TIMEOUT,
            fallback_timeout: FALLBACK_REQUEST_TIMEOUT,
            transport_failure: TransportFailureMode::Propagate,
        }
    }
}

impl From<&Config> for ProbeSettings {
    fn from(config: &Config) -> Self {
        Self {
            head_timeout: config.head_timeout(),
            fallback_timeout: config.fallback_timeout(),
            transport_failure: config.transport_failure,
        }
    }
}

/// Resolves redirect targets and chains against an injected HTTP client.
///
/// The client must be built with `reqwest::redirect::Policy::none()` (see
/// [`init_redirect_client`](crate::initialization::init_redirect_client));
/// otherwise the transport follows redirects itself and every chain has a
/// single element.
///
/// Cloning is cheap: the client, policy table and statistics are shared.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    pub(crate) client: reqwest::Client,
    pub(crate) policy: DomainPolicy,
    pub(crate) settings: ProbeSettings,
    pub(crate) stats: Option<Arc<ProbeStats>>,
}

impl RedirectResolver {
    /// Creates a resolver with default probe settings and no statistics.
    pub fn new(client: reqwest::Client, policy: DomainPolicy) -> Self {
        Self {
            client,
            policy,
            settings: ProbeSettings::default(),
            stats: None,
        }
    }

    /// Replaces the probe settings.
    pub fn with_settings(mut self, settings: ProbeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Records probe events and failures into `stats`.
    pub fn with_stats(mut self, stats: Arc<ProbeStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// The policy table consulted before each HEAD probe.
    pub fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    /// The active probe settings.
    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    pub(crate) fn record_info(&self, info_type: InfoType) {
        if let Some(stats) = &self.stats {
            stats.increment_info(info_type);
        }
    }

    pub(crate) fn record_error(&self, error: &ChainError) {
        if let Some(stats) = &self.stats {
            update_error_stats(stats, error);
        }
    }
}

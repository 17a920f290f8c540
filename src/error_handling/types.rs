//! Error type definitions.
//!
//! This module defines the error types returned by chain resolution and
//! initialization, plus the counter categories used by [`super::ProbeStats`].

use std::time::Duration;

use log::SetLoggerError;
use reqwest::{StatusCode, Url};
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// A terminal hop failure.
///
/// Returned by the probe when a hop cannot be resolved and propagated by the
/// chain walker as the failure of the whole resolution. Transient HEAD failures
/// never produce a `ChainError`; they fall back to GET instead.
#[derive(Error, Debug)]
pub enum ChainError {
    /// The GET request could not be completed.
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// URL of the failing hop
        url: Url,
        /// Underlying transport error
        source: reqwest::Error,
    },

    /// The GET request exceeded its deadline.
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout {
        /// URL of the failing hop
        url: Url,
        /// Deadline that elapsed
        timeout: Duration,
    },

    /// The hop answered with a 4xx or 5xx status.
    #[error("{url} responded with non-success status {status}")]
    HttpStatus {
        /// URL of the failing hop
        url: Url,
        /// Status returned by the server
        status: StatusCode,
    },

    /// The `Location` header could not be parsed into a URL.
    #[error("Invalid Location header {location:?} from {url}: {source}")]
    InvalidLocation {
        /// URL of the hop that sent the header
        url: Url,
        /// Raw header value
        location: String,
        /// Parser error
        source: url::ParseError,
    },

    /// The `Location` header is not valid UTF-8.
    #[error("Unreadable Location header from {url}")]
    UnreadableLocation {
        /// URL of the hop that sent the header
        url: Url,
    },
}

impl ChainError {
    /// URL of the hop that failed.
    pub fn url(&self) -> &Url {
        match self {
            ChainError::Transport { url, .. }
            | ChainError::Timeout { url, .. }
            | ChainError::HttpStatus { url, .. }
            | ChainError::InvalidLocation { url, .. }
            | ChainError::UnreadableLocation { url } => url,
        }
    }

    /// Whether the failure happened below HTTP (connection error or deadline).
    ///
    /// Only these failures are affected by
    /// [`TransportFailureMode`](crate::TransportFailureMode).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ChainError::Transport { .. } | ChainError::Timeout { .. }
        )
    }
}

/// Types of errors that can end a chain resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Transport errors
    /// Connection could not be established
    HttpRequestConnectError,
    /// GET fallback exceeded its deadline
    HttpRequestTimeoutError,
    /// Any other transport error
    HttpRequestOtherError,
    // Status errors
    /// 4xx response
    HttpStatusClientError,
    /// 5xx response
    HttpStatusServerError,
    // Location errors
    /// `Location` header did not parse as a URL
    InvalidLocationError,
    /// `Location` header was not visible ASCII
    UnreadableLocationError,
}

/// Types of informational metrics recorded while probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// HEAD skipped because the host is in the policy table
    HeadProbeSkipped,
    /// HEAD failed at the transport level and GET was used instead
    HeadProbeFallback,
    /// HEAD exceeded its deadline and GET was used instead
    HeadProbeTimeout,
    /// A `Location` header was followed to the next hop
    RedirectFollowed,
    /// The chain reached its maximum length
    ChainTruncated,
    /// A transport failure ended the chain instead of failing it
    ChainEndedOnTransportFailure,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpStatusClientError => "Client error status (4xx)",
            ErrorType::HttpStatusServerError => "Server error status (5xx)",
            ErrorType::InvalidLocationError => "Invalid Location header",
            ErrorType::UnreadableLocationError => "Unreadable Location header",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HeadProbeSkipped => "HEAD probe skipped by domain policy",
            InfoType::HeadProbeFallback => "HEAD probe failed, fell back to GET",
            InfoType::HeadProbeTimeout => "HEAD probe timed out, fell back to GET",
            InfoType::RedirectFollowed => "Redirect followed",
            InfoType::ChainTruncated => "Chain truncated at maximum length",
            InfoType::ChainEndedOnTransportFailure => "Chain ended on transport failure",
        }
    }
}

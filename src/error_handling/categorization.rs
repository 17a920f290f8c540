//! Error categorization.
//!
//! Maps chain failures onto the [`ErrorType`] counters.

use super::stats::ProbeStats;
use super::types::{ChainError, ErrorType};

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes a [`ChainError`] into an `ErrorType`.
pub fn categorize_chain_error(error: &ChainError) -> ErrorType {
    match error {
        ChainError::Transport { source, .. } => categorize_reqwest_error(source),
        ChainError::Timeout { .. } => ErrorType::HttpRequestTimeoutError,
        ChainError::HttpStatus { status, .. } if status.is_server_error() => {
            ErrorType::HttpStatusServerError
        }
        ChainError::HttpStatus { .. } => ErrorType::HttpStatusClientError,
        ChainError::InvalidLocation { .. } => ErrorType::InvalidLocationError,
        ChainError::UnreadableLocation { .. } => ErrorType::UnreadableLocationError,
    }
}

/// Updates statistics based on a [`ChainError`].
pub fn update_error_stats(stats: &ProbeStats, error: &ChainError) {
    stats.increment_error(categorize_chain_error(error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{StatusCode, Url};
    use std::time::Duration;

    fn url() -> Url {
        Url::parse("https://example.com").expect("static test URL")
    }

    #[test]
    fn test_categorize_status_errors() {
        let client = ChainError::HttpStatus {
            url: url(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            categorize_chain_error(&client),
            ErrorType::HttpStatusClientError
        );

        let server = ChainError::HttpStatus {
            url: url(),
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(
            categorize_chain_error(&server),
            ErrorType::HttpStatusServerError
        );
    }

    #[test]
    fn test_categorize_timeout_and_location_errors() {
        let timeout = ChainError::Timeout {
            url: url(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(
            categorize_chain_error(&timeout),
            ErrorType::HttpRequestTimeoutError
        );

        let unreadable = ChainError::UnreadableLocation { url: url() };
        assert_eq!(
            categorize_chain_error(&unreadable),
            ErrorType::UnreadableLocationError
        );
    }

    #[test]
    fn test_update_error_stats_increments_counter() {
        let stats = ProbeStats::new();
        let err = ChainError::HttpStatus {
            url: url(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        update_error_stats(&stats, &err);
        update_error_stats(&stats, &err);
        assert_eq!(stats.get_error_count(ErrorType::HttpStatusServerError), 2);
        assert_eq!(stats.total_errors(), 2);
    }
}

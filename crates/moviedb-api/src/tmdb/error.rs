//! TMDB client failure taxonomy.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for TMDB client operations.
pub type Result<T> = std::result::Result<T, TmdbError>;

/// A failed TMDB client operation.
///
/// Status-mapped variants keep the HTTP status and, when the upstream body
/// was a TMDB error object, its `status_message`.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// The client is missing required configuration (e.g. the credential).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// HTTP 401: the credential was rejected.
    #[error("invalid credential (HTTP 401){}", suffix(.message.as_deref()))]
    InvalidCredential {
        /// Upstream `status_message`.
        message: Option<String>,
    },

    /// HTTP 404: endpoint or resource absent.
    #[error("not found (HTTP 404){}", suffix(.message.as_deref()))]
    NotFound {
        /// Upstream `status_message`.
        message: Option<String>,
    },

    /// HTTP 429: too many requests.
    #[error("rate limited (HTTP 429){}", suffix(.message.as_deref()))]
    RateLimited {
        /// Upstream `status_message`.
        message: Option<String>,
    },

    /// HTTP 5xx: upstream failure.
    #[error("upstream server error (HTTP {status}){}", suffix(.message.as_deref()))]
    UpstreamServer {
        /// HTTP status code.
        status: u16,
        /// Upstream `status_message`.
        message: Option<String>,
    },

    /// Any other non-success status.
    #[error("HTTP error {status}{}", suffix(.message.as_deref()))]
    Http {
        /// HTTP status code.
        status: u16,
        /// Upstream `status_message`.
        message: Option<String>,
    },

    /// The bounded wait elapsed and the request was cancelled.
    #[error("request timed out after {} ms", .after.as_millis())]
    Timeout {
        /// The bound that was exceeded.
        after: Duration,
    },

    /// Network, DNS, TLS or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status with an empty, non-object or undecodable body.
    #[error("malformed response: {reason}")]
    MalformedResponse {
        /// What was wrong with the body.
        reason: String,
    },
}

fn suffix(message: Option<&str>) -> String {
    message.map_or_else(String::new, |m| format!(": {m}"))
}

impl TmdbError {
    /// Maps a non-success HTTP status to its failure kind.
    #[must_use]
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::InvalidCredential { message },
            StatusCode::NOT_FOUND => Self::NotFound { message },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited { message },
            s if s.is_server_error() => Self::UpstreamServer {
                status: s.as_u16(),
                message,
            },
            s => Self::Http {
                status: s.as_u16(),
                message,
            },
        }
    }

    /// HTTP status code for status-mapped failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredential { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::UpstreamServer { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Configuration(_)
            | Self::Timeout { .. }
            | Self::Transport(_)
            | Self::MalformedResponse { .. } => None,
        }
    }

    /// Whether re-invoking the same call later may succeed.
    ///
    /// The client never retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::UpstreamServer { .. }
                | Self::Timeout { .. }
                | Self::Transport(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        // Arrange & Act & Assert
        assert!(matches!(
            TmdbError::from_status(StatusCode::UNAUTHORIZED, None),
            TmdbError::InvalidCredential { .. }
        ));
        assert!(matches!(
            TmdbError::from_status(StatusCode::NOT_FOUND, None),
            TmdbError::NotFound { .. }
        ));
        assert!(matches!(
            TmdbError::from_status(StatusCode::TOO_MANY_REQUESTS, None),
            TmdbError::RateLimited { .. }
        ));
        assert!(matches!(
            TmdbError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None),
            TmdbError::UpstreamServer { status: 500, .. }
        ));
        assert!(matches!(
            TmdbError::from_status(StatusCode::SERVICE_UNAVAILABLE, None),
            TmdbError::UpstreamServer { status: 503, .. }
        ));
        assert!(matches!(
            TmdbError::from_status(StatusCode::FORBIDDEN, None),
            TmdbError::Http { status: 403, .. }
        ));
        assert!(matches!(
            TmdbError::from_status(StatusCode::IM_A_TEAPOT, None),
            TmdbError::Http { status: 418, .. }
        ));
    }

    #[test]
    fn test_status_accessor() {
        // Arrange
        let not_found = TmdbError::from_status(StatusCode::NOT_FOUND, None);
        let timeout = TmdbError::Timeout {
            after: Duration::from_millis(8000),
        };

        // Act & Assert
        assert_eq!(not_found.status(), Some(404));
        assert_eq!(timeout.status(), None);
    }

    #[test]
    fn test_is_retryable() {
        // Arrange & Act & Assert
        assert!(TmdbError::RateLimited { message: None }.is_retryable());
        assert!(
            TmdbError::Timeout {
                after: Duration::from_secs(1)
            }
            .is_retryable()
        );
        assert!(!TmdbError::InvalidCredential { message: None }.is_retryable());
        assert!(!TmdbError::Configuration(String::from("missing")).is_retryable());
    }

    #[test]
    fn test_display_includes_upstream_message() {
        // Arrange
        let error = TmdbError::from_status(
            StatusCode::UNAUTHORIZED,
            Some(String::from("Invalid API key: You must be granted a valid key.")),
        );

        // Act
        let text = error.to_string();

        // Assert
        assert_eq!(
            text,
            "invalid credential (HTTP 401): Invalid API key: You must be granted a valid key."
        );
    }

    #[test]
    fn test_display_timeout() {
        // Arrange
        let error = TmdbError::Timeout {
            after: Duration::from_millis(8000),
        };

        // Act & Assert
        assert_eq!(error.to_string(), "request timed out after 8000 ms");
    }
}

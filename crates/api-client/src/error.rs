//! Error types for the API client

use std::fmt;
use thiserror::Error;
use xeluxe_core::retry::Retryable;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message used when a `success: false` payload carries no `message`
pub const DEFAULT_FAILURE_MESSAGE: &str = "API request failed";

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused
    /// connection, timeout, unusable URL)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// The body was not JSON, or not the expected shape
    #[error("Invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload reported `success: false`
    #[error("{message}")]
    Application {
        /// Message from the payload, or [`DEFAULT_FAILURE_MESSAGE`]
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any request was sent
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an application error, falling back to the default message
    pub fn application(message: Option<&str>) -> Self {
        Self::Application {
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_FAILURE_MESSAGE)
                .to_string(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            // Retry on 5xx errors and 429 (rate limited)
            Self::Http { status } => *status >= 500 || *status == 429,
            Self::Parse(_) | Self::Application { .. } | Self::Config(_) | Self::Validation(_) => {
                false
            }
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Http { status } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Http { status } if *status >= 500)
    }

    /// Short machine-readable kind, used in logs and CLI output
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::Parse(_) => "parse",
            Self::Application { .. } => "application",
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
        }
    }
}

impl Retryable for ApiError {
    fn is_retryable(&self) -> bool {
        ApiError::is_retryable(self)
    }
}

/// Error context for better debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Request ID for correlation
    pub request_id: Option<String>,
    /// Endpoint that was called
    pub endpoint: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)?;
        if let Some(ref id) = self.request_id {
            write!(f, " (request_id: {id})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> ApiError {
        serde_json::from_str::<serde_json::Value>("<html>").unwrap_err().into()
    }

    #[test]
    fn test_http_classification() {
        assert!(ApiError::Http { status: 500 }.is_retryable());
        assert!(ApiError::Http { status: 503 }.is_retryable());
        assert!(ApiError::Http { status: 429 }.is_retryable());
        assert!(!ApiError::Http { status: 404 }.is_retryable());

        assert!(ApiError::Http { status: 404 }.is_client_error());
        assert!(ApiError::Http { status: 502 }.is_server_error());
    }

    #[test]
    fn test_permanent_errors() {
        assert!(!parse_error().is_retryable());
        assert!(!ApiError::application(None).is_retryable());
        assert!(!ApiError::validation("bad email").is_retryable());
        assert!(!ApiError::config("missing").is_retryable());
    }

    #[tokio::test]
    async fn test_network_errors_are_retryable() {
        let err: ApiError = reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .unwrap_err()
            .into();

        assert_eq!(err.kind(), "network");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_application_message() {
        assert_eq!(
            ApiError::application(Some("Invalid email")).to_string(),
            "Invalid email"
        );
        assert_eq!(ApiError::application(None).to_string(), DEFAULT_FAILURE_MESSAGE);
        assert_eq!(ApiError::application(Some("")).to_string(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_http_display() {
        assert_eq!(
            ApiError::Http { status: 404 }.to_string(),
            "HTTP error! status: 404"
        );
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext {
            request_id: Some("abc".to_string()),
            endpoint: "/public-api/settings.php".to_string(),
            method: "GET".to_string(),
        };
        assert_eq!(
            ctx.to_string(),
            "GET /public-api/settings.php (request_id: abc)"
        );
    }
}

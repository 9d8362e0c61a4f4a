//! Configuration for the Xeluxe API client
//!
//! Supports environment-based configuration with sensible defaults, and
//! conversion from the `.xeluxe.toml` file settings.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use xeluxe_core::config::Config;
use xeluxe_core::retry::RetryConfig;

/// Environment variable holding the API base URL
pub const BASE_URL_ENV: &str = "XELUXE_API_BASE_URL";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "XELUXE_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL prepended verbatim to every endpoint path.
    ///
    /// May be empty, in which case requests carry a relative URL and fail
    /// as network errors.
    pub base_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retry policy used by [`crate::XeluxeClient::get_with_retry`]
    pub retry: RetryConfig,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `XELUXE_API_BASE_URL`: Base URL of the content API (default: empty)
    /// - `XELUXE_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    pub fn from_env() -> ApiResult<Self> {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_default();

        let timeout = match env::var(TIMEOUT_ENV) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| {
                    ApiError::config(format!(
                        "{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}"
                    ))
                })?,
            Err(_) => Duration::from_secs(30),
        };

        Ok(Self {
            base_url,
            timeout,
            ..Self::default()
        })
    }

    /// Build from file configuration; a set `XELUXE_API_BASE_URL` wins
    /// over the file's `api.base_url`
    pub fn from_config(config: &Config) -> Self {
        let schema = &config.schema;
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| schema.api.base_url.clone());

        Self {
            base_url,
            timeout: schema.api.timeout(),
            retry: schema.retry.to_retry_config(),
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if !self.base_url.is_empty()
            && !self.base_url.starts_with("http://")
            && !self.base_url.starts_with("https://")
        {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://cms.xeluxe.example")
            .with_timeout(Duration::from_secs(60))
            .with_retry(RetryConfig::no_retry());

        assert_eq!(config.base_url, "https://cms.xeluxe.example");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.retry.max_retries, 0);
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default()
            .with_base_url("http://localhost:8080")
            .validate()
            .is_ok());

        assert!(ClientConfig::default()
            .with_base_url("ftp://cms.example")
            .validate()
            .is_err());
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_file_config() {
        let file = Config::from_toml(
            "[api]\nbase_url = \"https://cms.example\"\ntimeout_secs = 5\n[retry]\nmax_retries = 1\n",
        )
        .unwrap();

        let config = ClientConfig::from_config(&file);
        if env::var(BASE_URL_ENV).is_err() {
            assert_eq!(config.base_url, "https://cms.example");
        }
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retry.max_retries, 1);
    }
}

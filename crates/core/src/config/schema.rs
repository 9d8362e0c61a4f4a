//! Configuration schema definitions
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.

use crate::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub cache: CacheSection,

    #[serde(default)]
    pub retry: RetrySection,
}

/// Content API connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSection {
    /// Base URL prepended to every endpoint path (may be empty)
    #[serde(default)]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSection {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheSection {
    /// Serve reads through the cache
    #[serde(default)]
    pub enabled: bool,

    /// Storage directory; the per-user cache dir when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Entry lifetime in milliseconds
    #[serde(default = "default_ttl_ms")]
    pub default_ttl_ms: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: None,
            default_ttl_ms: default_ttl_ms(),
        }
    }
}

impl CacheSection {
    /// Entry lifetime as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }
}

fn default_ttl_ms() -> u64 {
    300_000
}

/// Retry policy for reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrySection {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Upper bound for a single delay, in milliseconds
    #[serde(default)]
    pub max_delay_ms: Option<u64>,

    /// Randomize delays by up to 25%
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: None,
            jitter: false,
        }
    }
}

impl RetrySection {
    /// Convert to the runtime retry policy
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: self.max_delay_ms.map(Duration::from_millis),
            jitter: self.jitter,
            ..RetryConfig::default()
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

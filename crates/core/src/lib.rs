//! Core utilities for the Xeluxe content client
//!
//! This crate provides the transport-independent pieces the API client and
//! CLI build on:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Retry**: Sequential retries with exponential backoff
//! - **Storage**: `localStorage`-shaped key-value backends (file and memory)
//! - **Cache**: Namespaced response cache with per-entry TTL
//! - **Configuration**: TOML-based configuration with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use xeluxe_core::prelude::*;
//!
//! # async fn run() -> xeluxe_core::Result<()> {
//! let config = Config::load(None)?;
//! let cache = ResponseCache::new(MemoryStorage::new())
//!     .with_default_ttl(config.schema.cache.default_ttl());
//!
//! let greeting: std::result::Result<String, String> = cache
//!     .cached("greeting", Duration::from_secs(60), || async {
//!         retry(|| async { Ok::<_, String>("hello".to_string()) }, 3, Duration::from_millis(100)).await
//!     })
//!     .await;
//! # let _ = greeting;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod error;
pub mod retry;
pub mod storage;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{CacheStats, ResponseCache, CACHE_PREFIX, DEFAULT_TTL};
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::retry::{retry, retry_transient, retry_with, RetryConfig, RetryOutcome, Retryable};
    pub use crate::storage::{FileStorage, MemoryStorage, Storage};
}

//! Shared command context: configuration, client, retry policy and cache

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use xeluxe_api_client::{ApiResult, ClientConfig, XeluxeClient};
use xeluxe_core::cache::ResponseCache;
use xeluxe_core::config::Config;
use xeluxe_core::retry::{retry_transient, RetryConfig};
use xeluxe_core::storage::{self, FileStorage};

/// Global options shared by every command
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub config: Option<String>,
    pub base_url: Option<String>,
    pub cached: bool,
    pub cache_dir: Option<PathBuf>,
    pub retries: Option<u32>,
    pub format: String,
}

/// Everything a command needs to talk to the API
pub struct Context {
    pub client: XeluxeClient,
    cache: Option<ResponseCache<FileStorage>>,
    cache_dir: PathBuf,
    ttl: Duration,
    retry: RetryConfig,
    format: String,
}

impl Context {
    /// Load configuration and build the client
    pub fn from_options(options: &Options) -> Result<Self> {
        let config = Config::load(options.config.as_deref())?;
        if let Some(path) = &config.path {
            debug!(path = %path, "Loaded configuration file");
        }

        let mut client_config = ClientConfig::from_config(&config);
        if let Some(base_url) = &options.base_url {
            client_config = client_config.with_base_url(base_url.clone());
        }

        let mut retry = client_config.retry.clone();
        if let Some(retries) = options.retries {
            retry.max_retries = retries;
        }

        let client = XeluxeClient::with_config(client_config.with_retry(retry.clone()))?;

        let cache_dir = options
            .cache_dir
            .clone()
            .or_else(|| config.schema.cache.dir.clone())
            .unwrap_or_else(storage::default_dir);
        let ttl = config.schema.cache.default_ttl();

        let cache = if options.cached || config.schema.cache.enabled {
            Some(open_cache(&cache_dir, ttl)?)
        } else {
            None
        };

        Ok(Self {
            client,
            cache,
            cache_dir,
            ttl,
            retry,
            format: options.format.clone(),
        })
    }

    /// Whether output should be JSON
    pub fn json(&self) -> bool {
        self.format == "json"
    }

    /// Cache at the configured location, whether or not reads use it
    pub fn cache_store(&self) -> Result<ResponseCache<FileStorage>> {
        open_cache(&self.cache_dir, self.ttl)
    }

    /// Run `operation` under the retry policy, going through the response
    /// cache under `key` when caching is on
    pub async fn fetch<T, F, Fut>(&self, key: &str, operation: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let attempt = || async {
            retry_transient(&self.retry, &operation)
                .await
                .map(|outcome| outcome.value)
        };

        let value = match &self.cache {
            Some(cache) => {
                let key = scoped_key(self.client.base_url(), key);
                cache.cached(&key, self.ttl, attempt).await?
            }
            None => attempt().await?,
        };
        Ok(value)
    }
}

/// Cache key bound to the API host, so two hosts never share an entry
fn scoped_key(base_url: &str, key: &str) -> String {
    format!("{}|{key}", base_url.trim_end_matches('/'))
}

fn open_cache(dir: &std::path::Path, ttl: Duration) -> Result<ResponseCache<FileStorage>> {
    let storage = FileStorage::open(dir)
        .with_context(|| format!("Failed to open cache directory {}", dir.display()))?;
    Ok(ResponseCache::new(storage).with_default_ttl(ttl))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_key_separates_hosts() {
        let a = scoped_key("https://cms-a.example/", "settings");
        let b = scoped_key("https://cms-b.example", "settings");

        assert_eq!(a, "https://cms-a.example|settings");
        assert_ne!(a, b);
        assert_eq!(a, scoped_key("https://cms-a.example", "settings"));
    }
}

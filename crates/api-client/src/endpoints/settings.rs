//! Site settings
//!
//! `GET /public-api/settings.php` returns settings grouped by section:
//!
//! ```json
//! { "success": true, "settings": { "general": { "site_name": "Xeluxe" } } }
//! ```
//!
//! [`SettingsApi::get`] keeps the grouping and also flattens every group into
//! a single `key -> value` map, stringifying each value.

use super::de::stringify;
use crate::client::XeluxeClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const SETTINGS_PATH: &str = "/public-api/settings.php";

/// Settings API interface
#[derive(Clone)]
pub struct SettingsApi {
    client: XeluxeClient,
}

impl SettingsApi {
    /// Create a new settings API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// Fetch all site settings, grouped and flattened
    ///
    /// GET /public-api/settings.php
    pub async fn get(&self) -> ApiResult<SettingsBundle> {
        let response: SettingsResponse = self.client.get(SETTINGS_PATH).await?;
        Ok(SettingsBundle::from_groups(&response.settings))
    }
}

#[derive(Debug, Deserialize)]
struct SettingsResponse {
    #[serde(default)]
    settings: Map<String, Value>,
}

/// Site settings in both grouped and flat form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsBundle {
    /// Settings by group (`contact`, `footer`, `general`, ...)
    pub groups: BTreeMap<String, BTreeMap<String, String>>,
    /// Every setting from every group, keyed by setting name
    pub parsed: BTreeMap<String, String>,
}

impl SettingsBundle {
    /// Build from the raw `settings` object.
    ///
    /// Non-object groups are skipped. When two groups share a key, the group
    /// that sorts last wins in `parsed`.
    pub fn from_groups(settings: &Map<String, Value>) -> Self {
        let mut bundle = Self::default();

        for (group_name, group) in settings {
            let Value::Object(entries) = group else {
                continue;
            };

            let group_map: BTreeMap<String, String> = entries
                .iter()
                .map(|(key, value)| (key.clone(), stringify(value)))
                .collect();

            bundle
                .parsed
                .extend(group_map.iter().map(|(k, v)| (k.clone(), v.clone())));
            bundle.groups.insert(group_name.clone(), group_map);
        }

        bundle
    }

    /// Look up a flattened setting
    pub fn value(&self, key: &str) -> Option<&str> {
        self.parsed.get(key).map(String::as_str)
    }

    /// Look up a setting, falling back to `default` when absent or empty
    pub fn value_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.value(key).filter(|v| !v.is_empty()).unwrap_or(default)
    }

    /// One settings group
    pub fn group(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.groups.get(name)
    }
}

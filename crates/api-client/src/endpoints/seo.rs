//! Per-page SEO metadata

use super::de::flexible_bool;
use super::{with_query, DataResponse};
use crate::client::XeluxeClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Identifier of the site root
pub const HOME_IDENTIFIER: &str = "home";

/// SEO API interface
#[derive(Clone)]
pub struct SeoApi {
    client: XeluxeClient,
}

impl SeoApi {
    /// Create a new SEO API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// Metadata for a page identifier
    ///
    /// GET /public-api/seo-data.php?page_identifier=<identifier>
    pub async fn page(&self, identifier: &str) -> ApiResult<SeoData> {
        let path = with_query(
            "/public-api/seo-data.php",
            &[("page_identifier", Some(identifier.to_string()))],
        );
        let response: DataResponse<SeoData> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Metadata for a route path, e.g. `/about-us`
    pub async fn for_path(&self, path: &str) -> ApiResult<SeoData> {
        self.page(&page_identifier(path)).await
    }
}

/// Page identifier for a route path: the path without its leading `/`,
/// or `"home"` for the root
pub fn page_identifier(path: &str) -> String {
    let identifier = path.strip_prefix('/').unwrap_or(path);
    if identifier.is_empty() {
        HOME_IDENTIFIER.to_string()
    } else {
        identifier.to_string()
    }
}

/// SEO metadata record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SeoData {
    pub id: i64,
    pub page_identifier: String,
    pub page_name: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub canonical_url: Option<String>,
    #[serde(deserialize_with = "flexible_bool")]
    pub robots_index: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub robots_follow: bool,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub schema_type: Option<String>,
    pub schema_data: Option<String>,
    pub hreflang_tags: Option<String>,
    pub custom_head_tags: Option<String>,
}

impl SeoData {
    /// `robots` meta content derived from the index/follow flags
    pub fn robots(&self) -> String {
        format!(
            "{}, {}",
            if self.robots_index { "index" } else { "noindex" },
            if self.robots_follow { "follow" } else { "nofollow" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_identifier() {
        assert_eq!(page_identifier("/"), "home");
        assert_eq!(page_identifier(""), "home");
        assert_eq!(page_identifier("/about-us"), "about-us");
        assert_eq!(page_identifier("/service/fire-audits"), "service/fire-audits");
        assert_eq!(page_identifier("careers"), "careers");
    }

    #[test]
    fn test_robots() {
        let seo = SeoData {
            robots_index: true,
            ..SeoData::default()
        };
        assert_eq!(seo.robots(), "index, nofollow");
    }
}

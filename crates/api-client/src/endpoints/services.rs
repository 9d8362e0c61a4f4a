//! Service categories and service details

use super::de::{flexible_bool, nullable_string};
use super::{with_query, DataResponse, ListResponse};
use crate::client::XeluxeClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Services API interface
#[derive(Clone)]
pub struct ServicesApi {
    client: XeluxeClient,
}

impl ServicesApi {
    /// Create a new services API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// Service categories with their nested services, for the header menu
    ///
    /// GET /public-api/service-categories.php
    pub async fn categories(&self) -> ApiResult<ListResponse<ServiceCategory>> {
        self.client.get("/public-api/service-categories.php").await
    }

    /// Service categories with counts, for the home page
    ///
    /// GET /public-api/service-categories-list.php
    pub async fn categories_list(&self) -> ApiResult<ListResponse<ServiceCategorySummary>> {
        self.client
            .get("/public-api/service-categories-list.php")
            .await
    }

    /// One service with its related services
    ///
    /// GET /public-api/service.php?slug=<slug>
    pub async fn by_slug(&self, slug: &str) -> ApiResult<ServicePage> {
        let path = with_query("/public-api/service.php", &[("slug", Some(slug.to_string()))]);
        let response: DataResponse<ServicePage> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// One service by numeric ID from the admin API
    ///
    /// GET /api/services.php?action=get&id=<id>
    pub async fn by_id(&self, id: i64) -> ApiResult<AdminService> {
        let path = with_query(
            "/api/services.php",
            &[("action", Some("get".to_string())), ("id", Some(id.to_string()))],
        );
        let response: AdminServiceResponse = self.client.get(&path).await?;
        Ok(response.service)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Menu entry for a single service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ServiceMenuItem {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub slug: String,
}

/// Service category with nested services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ServiceCategory {
    pub id: i64,
    pub category_name: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    pub services: Vec<ServiceMenuItem>,
}

/// Home page summary of a service category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ServiceCategorySummary {
    pub id: i64,
    pub category_name: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    pub services_count: u32,
    /// Slug of the first service, used to link straight to it
    pub first_service_slug: Option<String>,
}

/// Service detail page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicePage {
    /// The service itself
    pub service: ServiceDetail,
    /// Other services in the same category
    pub related_services: Vec<RelatedService>,
    /// Number of related services
    pub related_count: u32,
}

/// Full service record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ServiceDetail {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    /// HTML body
    #[serde(deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    pub display_order: i32,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub canonical_url: Option<String>,
    #[serde(deserialize_with = "flexible_bool")]
    pub robots_index: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub robots_follow: bool,
    pub category_name: String,
    pub category_slug: String,
}

/// Sibling service shown on a detail page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RelatedService {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    pub display_order: i32,
}

/// Service record as the admin API returns it
///
/// List-like fields (`gallery_images`, `key_features`, `faqs`, ...) arrive as
/// raw strings; see [`crate::content`] for parsing them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AdminService {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub service_title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub full_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub hero_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub thumbnail_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub gallery_images: String,
    #[serde(deserialize_with = "nullable_string")]
    pub icon_class: String,
    #[serde(deserialize_with = "nullable_string")]
    pub key_features: String,
    #[serde(deserialize_with = "nullable_string")]
    pub benefits: String,
    #[serde(deserialize_with = "nullable_string")]
    pub process: String,
    #[serde(deserialize_with = "nullable_string")]
    pub compliance_standards: String,
    #[serde(deserialize_with = "nullable_string")]
    pub related_sectors: String,
    #[serde(deserialize_with = "nullable_string")]
    pub faqs: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub display_order: i32,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct AdminServiceResponse {
    service: AdminService,
}

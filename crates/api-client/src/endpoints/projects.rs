//! Projects, project categories and sectors
//!
//! Project categories double as industry sectors: the header menu lists
//! them under "Sectors" and each has a `/sector/<slug>` page.

use super::de::{flexible_bool, nullable_string, string_list};
use super::{with_query, DataResponse, ListResponse};
use crate::client::XeluxeClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::warn;

/// Projects API interface
#[derive(Clone)]
pub struct ProjectsApi {
    client: XeluxeClient,
}

impl ProjectsApi {
    /// Create a new projects API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// Project categories with nested projects, for the header menu
    ///
    /// GET /public-api/project-categories.php
    pub async fn categories(&self) -> ApiResult<ListResponse<ProjectCategory>> {
        self.client.get("/public-api/project-categories.php").await
    }

    /// Featured projects for the home page
    ///
    /// GET /public-api/featured-projects.php
    pub async fn featured(&self) -> ApiResult<ListResponse<FeaturedProject>> {
        self.client.get("/public-api/featured-projects.php").await
    }

    /// Featured sectors for the home page
    ///
    /// GET /public-api/featured-sectors.php
    pub async fn featured_sectors(&self) -> ApiResult<ListResponse<FeaturedSector>> {
        self.client.get("/public-api/featured-sectors.php").await
    }

    /// Every sector
    ///
    /// GET /public-api/project-sectors.php
    pub async fn sectors(&self) -> ApiResult<ListResponse<ProjectSector>> {
        self.client.get("/public-api/project-sectors.php").await
    }

    /// One project with related projects
    ///
    /// GET /public-api/project.php?slug=<slug>
    pub async fn by_slug(&self, slug: &str) -> ApiResult<ProjectPage> {
        let path = with_query("/public-api/project.php", &[("slug", Some(slug.to_string()))]);
        let response: DataResponse<ProjectPage> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// One sector with its featured projects
    ///
    /// GET /public-api/sector.php?slug=<slug>
    pub async fn sector_by_slug(&self, slug: &str) -> ApiResult<SectorPage> {
        let path = with_query("/public-api/sector.php", &[("slug", Some(slug.to_string()))]);
        let response: DataResponse<SectorPage> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Every project in a category, by category slug
    ///
    /// GET /public-api/projects.php?action=by-category&category=<slug>
    pub async fn by_category(&self, category_slug: &str) -> ApiResult<Vec<CategoryProject>> {
        let path = with_query(
            "/public-api/projects.php",
            &[
                ("action", Some("by-category".to_string())),
                ("category", Some(category_slug.to_string())),
            ],
        );
        let response: CategoryProjectsResponse = self.client.get(&path).await?;
        Ok(response.projects)
    }

    /// Every sector paired with its projects, dropping sectors without any.
    ///
    /// Per-sector project lookups run concurrently. A sector whose lookup
    /// fails is logged and treated as empty; only the sector list itself
    /// can fail the call. Sector order is preserved.
    pub async fn sectors_with_projects(&self) -> ApiResult<Vec<SectorWithProjects>> {
        let sectors = self.sectors().await?.data;

        let mut lookups = JoinSet::new();
        for (index, sector) in sectors.iter().enumerate() {
            let api = self.clone();
            let slug = sector.slug.clone();
            lookups.spawn(async move { (index, slug.clone(), api.by_category(&slug).await) });
        }

        let mut projects_by_index = vec![Vec::new(); sectors.len()];
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((index, _, Ok(projects))) => projects_by_index[index] = projects,
                Ok((_, slug, Err(e))) => {
                    warn!(sector = %slug, error = %e, "Failed to fetch projects for sector");
                }
                Err(e) => warn!(error = %e, "Sector project lookup task failed"),
            }
        }

        Ok(sectors
            .into_iter()
            .zip(projects_by_index)
            .filter(|(_, projects)| !projects.is_empty())
            .map(|(sector, projects)| SectorWithProjects { sector, projects })
            .collect())
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Menu entry for a single project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ProjectMenuItem {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub slug: String,
}

/// Project category with nested projects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ProjectCategory {
    pub id: i64,
    pub category_name: String,
    pub slug: String,
    pub projects: Vec<ProjectMenuItem>,
}

/// Home page project card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct FeaturedProject {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub location: String,
    pub category_name: String,
}

/// Home page sector card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct FeaturedSector {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub location: String,
    pub category_name: String,
    pub category_slug: String,
}

/// Sector (project category) listing entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ProjectSector {
    pub id: i64,
    pub category_name: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
}

/// Project detail page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPage {
    /// The project itself
    pub project: ProjectDetail,
    /// Other projects in the same category
    pub related_projects: Vec<RelatedProject>,
    /// Number of related projects
    pub related_count: u32,
}

/// Full project record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ProjectDetail {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub location: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    /// HTML body
    #[serde(deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(deserialize_with = "string_list")]
    pub gallery_images: Vec<String>,
    pub view_order: i32,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_featured: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_active: bool,
    pub seo_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_robots: Option<String>,
    pub canonical_url: Option<String>,
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
    pub created_at: String,
    pub updated_at: String,
    pub category_name: String,
    pub category_slug: String,
}

/// Sibling project shown on a detail page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RelatedProject {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub location: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    pub view_order: i32,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_featured: bool,
}

/// Sector detail page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorPage {
    /// The sector itself
    pub sector: SectorDetail,
    /// Featured projects in the sector
    pub featured_projects: Vec<SectorProject>,
    /// Total projects in the sector
    pub projects_count: u32,
}

/// Full sector record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SectorDetail {
    pub id: i64,
    pub category_name: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    /// HTML body
    #[serde(deserialize_with = "nullable_string")]
    pub description: String,
    pub view_order: i32,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_active: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Project card on a sector page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SectorProject {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub location: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "string_list")]
    pub gallery_images: Vec<String>,
    pub view_order: i32,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_featured: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_active: bool,
    pub seo_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
struct CategoryProjectsResponse {
    #[serde(default)]
    projects: Vec<CategoryProject>,
}

/// Project listed under a category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CategoryProject {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub location: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(deserialize_with = "string_list")]
    pub gallery_images: Vec<String>,
    pub view_order: i32,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_featured: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_active: bool,
    pub seo_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub category_name: String,
    pub category_slug: String,
}

/// A sector together with its projects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorWithProjects {
    /// The sector
    pub sector: ProjectSector,
    /// Its projects, never empty
    pub projects: Vec<CategoryProject>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_project_gallery_string() {
        let response: CategoryProjectsResponse = serde_json::from_value(json!({
            "success": true,
            "projects": [{
                "id": 9,
                "title": "Airport Terminal",
                "slug": "airport-terminal",
                "gallery_images": "/uploads/a.jpg, /uploads/b.jpg",
                "is_featured": 1,
                "is_active": "1",
                "seo_title": null
            }]
        }))
        .unwrap();

        let project = &response.projects[0];
        assert_eq!(project.gallery_images, vec!["/uploads/a.jpg", "/uploads/b.jpg"]);
        assert!(project.is_featured);
        assert!(project.is_active);
    }

    #[test]
    fn test_project_detail_gallery_array() {
        let page: ProjectPage = serde_json::from_value(json!({
            "project": {"id": 1, "gallery_images": ["/x.jpg"], "is_featured": false},
            "related_projects": [],
            "related_count": 0
        }))
        .unwrap();

        assert_eq!(page.project.gallery_images, vec!["/x.jpg"]);
    }
}

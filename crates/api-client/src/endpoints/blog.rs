//! Insights (blog) listing and posts

use super::de::{flexible_bool, nullable_string};
use super::{with_query, Pagination};
use crate::client::XeluxeClient;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Blog API interface
#[derive(Clone)]
pub struct BlogApi {
    client: XeluxeClient,
}

impl BlogApi {
    /// Create a new blog API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// List posts matching `filters`
    ///
    /// GET /public-api/blogs.php?type=&sector_id=&service_id=&sort=&page=&limit=
    pub async fn list(&self, filters: &BlogFilters) -> ApiResult<BlogList> {
        self.client.get(&filters.to_path()).await
    }

    /// One post with suggestions for further reading
    ///
    /// GET /public-api/blog.php?slug=<slug>
    pub async fn by_slug(&self, slug: &str) -> ApiResult<BlogPostPage> {
        let path = with_query("/public-api/blog.php", &[("slug", Some(slug.to_string()))]);
        let response: BlogPostResponse = self.client.get(&path).await?;

        response
            .data
            .and_then(|data| {
                data.blog.map(|blog| BlogPostPage {
                    blog,
                    other_blogs: data.other_blogs,
                })
            })
            .ok_or_else(|| ApiError::application(Some("Blog post not found")))
    }

    /// Listing page headings from the admin API
    ///
    /// GET /api/blog.php?action=get_settings
    pub async fn page_settings(&self) -> ApiResult<BlogPageSettings> {
        let response: SettingsResponse<BlogPageSettings> =
            self.client.get("/api/blog.php?action=get_settings").await?;
        Ok(response.settings)
    }

    /// Featured posts from the admin API
    ///
    /// GET /api/blog.php?action=list_featured
    pub async fn featured(&self) -> ApiResult<Vec<AdminBlogPost>> {
        let response: AdminPostsResponse =
            self.client.get("/api/blog.php?action=list_featured").await?;
        Ok(response.posts)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Filters for the blog listing; unset filters are left out of the query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogFilters {
    /// Post type, e.g. `"news"` or `"case-study"`
    pub blog_type: Option<String>,
    /// Restrict to one sector
    pub sector_id: Option<i64>,
    /// Restrict to one service
    pub service_id: Option<i64>,
    /// Sort order understood by the server, e.g. `"latest"`
    pub sort: Option<String>,
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl BlogFilters {
    /// Request path with the set filters as query parameters
    pub fn to_path(&self) -> String {
        with_query(
            "/public-api/blogs.php",
            &[
                ("type", self.blog_type.clone()),
                ("sector_id", self.sector_id.map(|v| v.to_string())),
                ("service_id", self.service_id.map(|v| v.to_string())),
                ("sort", self.sort.clone()),
                ("page", self.page.map(|v| v.to_string())),
                ("limit", self.limit.map(|v| v.to_string())),
            ],
        )
    }
}

/// Page of blog posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogList {
    /// Posts on this page
    pub data: Vec<BlogPost>,
    /// Paging information
    pub pagination: Pagination,
}

/// Blog post (listing fields plus body when fetched by slug)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BlogPost {
    pub id: i64,
    pub sector_id: Option<i64>,
    pub service_id: Option<i64>,
    pub blog_type: String,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    /// HTML body; empty in listings
    #[serde(deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_active: bool,
    pub view_order: i32,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub sector_name: Option<String>,
    pub sector_slug: Option<String>,
    pub service_name: Option<String>,
    pub service_slug: Option<String>,
}

/// A post and other posts to read next
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostPage {
    /// The post
    pub blog: BlogPost,
    /// Suggested posts
    pub other_blogs: Vec<BlogPost>,
}

#[derive(Debug, Deserialize)]
struct BlogPostResponse {
    data: Option<BlogPostData>,
}

#[derive(Debug, Deserialize)]
struct BlogPostData {
    blog: Option<BlogPost>,
    #[serde(default)]
    other_blogs: Vec<BlogPost>,
}

/// Headings for the insights listing page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BlogPageSettings {
    pub page_title: String,
    pub page_subtitle: String,
    pub featured_section_title: String,
    pub posts_per_page: u32,
}

/// Post record as the admin API returns it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AdminBlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub excerpt: String,
    #[serde(deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    #[serde(deserialize_with = "nullable_string")]
    pub author_name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub author_designation: String,
    #[serde(deserialize_with = "nullable_string")]
    pub author_image: String,
    pub published_date: String,
    #[serde(deserialize_with = "nullable_string")]
    pub read_time: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_featured: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SettingsResponse<T> {
    pub settings: T,
}

#[derive(Debug, Deserialize)]
struct AdminPostsResponse {
    #[serde(default)]
    posts: Vec<AdminBlogPost>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_to_path() {
        assert_eq!(BlogFilters::default().to_path(), "/public-api/blogs.php");

        let filters = BlogFilters {
            blog_type: Some("news".to_string()),
            sector_id: Some(3),
            page: Some(2),
            limit: Some(9),
            ..BlogFilters::default()
        };
        assert_eq!(
            filters.to_path(),
            "/public-api/blogs.php?type=news&sector_id=3&page=2&limit=9"
        );
    }

    #[test]
    fn test_blog_list_shape() {
        let list: BlogList = serde_json::from_value(json!({
            "success": true,
            "data": [{
                "id": 1,
                "sector_id": null,
                "blog_type": "news",
                "title": "New office",
                "slug": "new-office",
                "is_active": 1,
                "sector_name": null
            }],
            "pagination": {"current_page": 1, "per_page": 9, "total_items": 1, "total_pages": 1, "has_next": false, "has_prev": false}
        }))
        .unwrap();

        assert_eq!(list.data[0].slug, "new-office");
        assert!(list.data[0].sector_id.is_none());
        assert_eq!(list.pagination.total_items, 1);
    }

    #[test]
    fn test_featured_posts_shape() {
        let response: AdminPostsResponse = serde_json::from_value(json!({
            "success": true,
            "posts": [{
                "id": 2,
                "title": "Atrium smoke study",
                "slug": "atrium-smoke-study",
                "author_name": null,
                "is_featured": "1",
                "published_date": "2024-03-05"
            }]
        }))
        .unwrap();

        let post = &response.posts[0];
        assert!(post.is_featured);
        assert!(post.author_name.is_empty());
        assert_eq!(post.published_date, "2024-03-05");
    }
}

//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one area of the public
//! content API. All paths live under `/public-api/`.
//!
//! | Module | Backend scripts | Description |
//! |--------|-----------------|-------------|
//! | `settings` | `settings.php` | Grouped site settings |
//! | `about` | `about-us.php` | About Us page, values and team |
//! | `services` | `service-categories*.php`, `service.php` | Service menu and details |
//! | `projects` | `project*.php`, `featured-*.php`, `sector.php` | Projects and sectors |
//! | `blog` | `blogs.php`, `blog.php` | Insights listing and posts |
//! | `careers` | `careers.php`, `career.php`, lookups, `apply-job.php` | Job postings |
//! | `clients` | `clients.php` | Client logos |
//! | `recognitions` | `recognitions.php` | Certificates and awards |
//! | `contact` | `contact-form.php`, `addresses.php` | Enquiries and offices |
//! | `seo` | `seo-data.php` | Per-page metadata |

pub mod about;
pub mod blog;
pub mod careers;
pub mod clients;
pub mod contact;
pub(crate) mod de;
pub mod projects;
pub mod recognitions;
pub mod seo;
pub mod services;
pub mod settings;

pub use about::AboutApi;
pub use blog::BlogApi;
pub use careers::CareersApi;
pub use clients::ClientsApi;
pub use contact::ContactApi;
pub use projects::ProjectsApi;
pub use recognitions::RecognitionsApi;
pub use seo::SeoApi;
pub use services::ServicesApi;
pub use settings::SettingsApi;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// `{ success, data: [...], count }` list envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Items returned
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Item count as reported by the server
    #[serde(default)]
    pub count: u64,
}

/// `{ success, data: {...} }` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Payload
    pub data: T,
}

/// Pagination block of paged listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Current page (1-based)
    pub current_page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total matching items
    pub total_items: u64,
    /// Total pages
    pub total_pages: u32,
    /// Whether a later page exists
    #[serde(deserialize_with = "de::flexible_bool")]
    pub has_next: bool,
    /// Whether an earlier page exists
    #[serde(deserialize_with = "de::flexible_bool")]
    pub has_prev: bool,
}

/// Append `?key=value&...` for the set parameters; nothing when none are set
pub(crate) fn with_query(path: &str, params: &[(&str, Option<String>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }

    if any {
        format!("{path}?{}", serializer.finish())
    } else {
        path.to_string()
    }
}

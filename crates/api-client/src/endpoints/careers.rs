//! Job postings, lookup lists and applications

use super::de::nullable_string;
use super::blog::SettingsResponse;
use super::{with_query, DataResponse, ListResponse, Pagination};
use crate::client::XeluxeClient;
use crate::content::is_valid_email;
use crate::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted resume, in bytes (5 MB)
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Accepted resume content types: PDF, Word 97-2003, Word 2007+
pub const RESUME_CONTENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Careers API interface
#[derive(Clone)]
pub struct CareersApi {
    client: XeluxeClient,
}

impl CareersApi {
    /// Create a new careers API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// List open positions matching `filters`
    ///
    /// GET /public-api/careers.php?department_id=&location_id=&experience_level_id=&page=&limit=
    pub async fn list(&self, filters: &CareerFilters) -> ApiResult<CareerList> {
        self.client.get(&filters.to_path()).await
    }

    /// One position with its full description
    ///
    /// GET /public-api/career.php?slug=<slug>
    pub async fn by_slug(&self, slug: &str) -> ApiResult<Career> {
        let path = with_query("/public-api/career.php", &[("slug", Some(slug.to_string()))]);
        let response: DataResponse<Career> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Departments, for the listing filter
    ///
    /// GET /public-api/departments.php
    pub async fn departments(&self) -> ApiResult<Vec<Lookup>> {
        let response: ListResponse<Lookup> = self.client.get("/public-api/departments.php").await?;
        Ok(response.data)
    }

    /// Office locations, for the listing filter
    ///
    /// GET /public-api/locations.php
    pub async fn locations(&self) -> ApiResult<Vec<Lookup>> {
        let response: ListResponse<Lookup> = self.client.get("/public-api/locations.php").await?;
        Ok(response.data)
    }

    /// Experience levels, for the listing filter
    ///
    /// GET /public-api/experience-levels.php
    pub async fn experience_levels(&self) -> ApiResult<Vec<Lookup>> {
        let response: ListResponse<Lookup> =
            self.client.get("/public-api/experience-levels.php").await?;
        Ok(response.data)
    }

    /// Page copy and application contact from the admin API
    ///
    /// GET /api/careers.php?action=get_settings
    pub async fn page_settings(&self) -> ApiResult<CareersPageSettings> {
        let response: SettingsResponse<CareersPageSettings> =
            self.client.get("/api/careers.php?action=get_settings").await?;
        Ok(response.settings)
    }

    /// Submit an application with a resume attached.
    ///
    /// The application is validated first; an invalid one fails with
    /// [`ApiError::Validation`] and sends nothing.
    ///
    /// POST /public-api/apply-job.php (multipart)
    pub async fn apply(&self, application: &JobApplication) -> ApiResult<SubmissionReceipt> {
        application.validate()?;
        let form = application.to_form()?;
        self.client
            .post_multipart("/public-api/apply-job.php", form)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Careers page copy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CareersPageSettings {
    pub page_title: String,
    pub page_subtitle: String,
    pub why_work_title: String,
    #[serde(deserialize_with = "nullable_string")]
    pub why_work_content: String,
    pub benefits_title: String,
    #[serde(deserialize_with = "nullable_string")]
    pub benefits_list: String,
    pub application_email: String,
}

/// Filters for the careers listing; unset filters are left out of the query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct CareerFilters {
    pub department_id: Option<i64>,
    pub location_id: Option<i64>,
    pub experience_level_id: Option<i64>,
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl CareerFilters {
    /// Request path with the set filters as query parameters
    pub fn to_path(&self) -> String {
        with_query(
            "/public-api/careers.php",
            &[
                ("department_id", self.department_id.map(|v| v.to_string())),
                ("location_id", self.location_id.map(|v| v.to_string())),
                (
                    "experience_level_id",
                    self.experience_level_id.map(|v| v.to_string()),
                ),
                ("page", self.page.map(|v| v.to_string())),
                ("limit", self.limit.map(|v| v.to_string())),
            ],
        )
    }
}

/// Page of open positions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerList {
    /// Positions on this page
    pub data: Vec<Career>,
    /// Paging information
    pub pagination: Pagination,
}

/// `{ id, name }` reference used by lookups and postings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Lookup {
    pub id: i64,
    pub name: String,
}

/// Job posting; the HTML sections are only filled when fetched by slug
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Career {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(deserialize_with = "nullable_string")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    pub employment_type: String,
    pub status: String,
    pub view_order: i32,
    pub created_at: String,
    pub updated_at: String,
    pub department: Lookup,
    pub location: Lookup,
    pub experience_level: Lookup,
    pub salary_range: Option<Lookup>,
    #[serde(deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(deserialize_with = "nullable_string")]
    pub key_responsibilities: String,
    #[serde(deserialize_with = "nullable_string")]
    pub requirements: String,
    #[serde(deserialize_with = "nullable_string")]
    pub benefits_perks: String,
}

/// Server acknowledgement of a form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionReceipt {
    /// Confirmation text, when the server sends one
    #[serde(deserialize_with = "nullable_string")]
    pub message: String,
}

/// Resume attachment
#[derive(Clone)]
pub struct Resume {
    /// File name sent to the server
    pub file_name: String,
    /// MIME type; must be one of [`RESUME_CONTENT_TYPES`]
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Resume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resume")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Resume {
    /// Read a resume from disk, deriving the content type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let content_type = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("pdf") => RESUME_CONTENT_TYPES[0],
            Some("doc") => RESUME_CONTENT_TYPES[1],
            Some("docx") => RESUME_CONTENT_TYPES[2],
            _ => return Err(ApiError::validation("Please upload a PDF or Word document")),
        };

        let bytes = std::fs::read(path).map_err(|e| {
            ApiError::validation(format!("Could not read {}: {e}", path.display()))
        })?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("resume")
            .to_string();

        Ok(Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        })
    }

    /// Check type and size limits
    pub fn validate(&self) -> ApiResult<()> {
        if !RESUME_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(ApiError::validation("Please upload a PDF or Word document"));
        }
        if self.bytes.len() > MAX_RESUME_BYTES {
            return Err(ApiError::validation("File size must be less than 5MB"));
        }
        Ok(())
    }
}

/// Job application form
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct JobApplication {
    pub job_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume: Resume,
}

impl JobApplication {
    /// Check required fields, email syntax and the resume
    pub fn validate(&self) -> ApiResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(ApiError::validation("Full name is required"));
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::validation("Please enter a valid email address"));
        }
        self.resume.validate()
    }

    fn to_form(&self) -> ApiResult<Form> {
        let resume = Part::bytes(self.resume.bytes.clone())
            .file_name(self.resume.file_name.clone())
            .mime_str(&self.resume.content_type)
            .map_err(|e| ApiError::validation(format!("Invalid resume content type: {e}")))?;

        Ok(Form::new()
            .text("job_id", self.job_id.to_string())
            .text("full_name", self.full_name.clone())
            .text("email", self.email.clone())
            .text("phone", self.phone.clone())
            .text("cover_letter", self.cover_letter.clone())
            .part("resume", resume))
    }
}

//! About Us page content

use super::DataResponse;
use crate::client::XeluxeClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// About Us API interface
#[derive(Clone)]
pub struct AboutApi {
    client: XeluxeClient,
}

impl AboutApi {
    /// Create a new About Us API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// Fetch the whole About Us page in one call
    ///
    /// GET /public-api/about-us.php
    pub async fn get(&self) -> ApiResult<AboutUs> {
        let response: DataResponse<AboutUs> = self.client.get("/public-api/about-us.php").await?;
        Ok(response.data)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// About Us page content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutUs {
    /// Intro block
    pub about_us: AboutIntro,
    /// Vision and mission block
    pub vision_mission: VisionMission,
    /// Leadership section headings
    pub leadership: LeadershipHeading,
    /// Company values, in display order
    pub values: Vec<ValueItem>,
    /// Number of values
    pub values_count: u32,
    /// Leadership team
    pub team_members: Vec<TeamMember>,
    /// Number of team members
    pub team_members_count: u32,
}

/// Intro block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AboutIntro {
    pub page_title: String,
    pub page_subtitle: String,
    pub quote_text: String,
    pub quote_subtext: String,
    /// HTML body
    pub about_content: String,
}

/// Vision and mission block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct VisionMission {
    pub section_title: String,
    pub section_subtitle: String,
    pub vision_content: String,
    pub mission_content: String,
}

/// Leadership section headings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct LeadershipHeading {
    pub leadership_title: String,
    pub leadership_subtitle: String,
}

/// A company value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ValueItem {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub icon_path: String,
    pub view_order: i32,
}

/// A leadership team member
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub description: String,
    pub photo_path: String,
    pub view_order: i32,
}

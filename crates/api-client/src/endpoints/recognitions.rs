//! Recognitions and certificates

use super::clients::SectionHeading;
use crate::client::XeluxeClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Recognitions API interface
#[derive(Clone)]
pub struct RecognitionsApi {
    client: XeluxeClient,
}

impl RecognitionsApi {
    /// Create a new recognitions API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// Recognitions with the section headings
    ///
    /// GET /public-api/recognitions.php
    pub async fn list(&self) -> ApiResult<RecognitionsPage> {
        self.client.get("/public-api/recognitions.php").await
    }
}

/// Recognitions section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionsPage {
    /// Section headings
    pub settings: SectionHeading,
    /// Recognitions, in display order
    pub recognitions: Vec<RecognitionItem>,
    /// Number of recognitions
    pub count: u32,
}

/// A certificate or award
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RecognitionItem {
    pub id: i64,
    pub certificate_image: String,
    pub recognition_title: String,
    pub organization_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recognitions_shape() {
        let page: RecognitionsPage = serde_json::from_value(json!({
            "success": true,
            "settings": {"page_title": "Recognitions"},
            "recognitions": [{"id": 1, "recognition_title": "ISO 9001", "organization_name": "BSI"}],
            "count": 1
        }))
        .unwrap();

        assert_eq!(page.settings.page_title, "Recognitions");
        assert!(page.settings.page_subtitle.is_empty());
        assert_eq!(page.recognitions[0].organization_name, "BSI");
    }
}

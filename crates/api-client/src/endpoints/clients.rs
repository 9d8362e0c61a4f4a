//! Client showcase

use crate::client::XeluxeClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Clients API interface
#[derive(Clone)]
pub struct ClientsApi {
    client: XeluxeClient,
}

impl ClientsApi {
    /// Create a new clients API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// Client logos with the section headings
    ///
    /// GET /public-api/clients.php
    pub async fn list(&self) -> ApiResult<ClientsPage> {
        self.client.get("/public-api/clients.php").await
    }
}

/// Section heading pair shared by the showcase pages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SectionHeading {
    pub page_title: String,
    pub page_subtitle: String,
}

/// Clients section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientsPage {
    /// Section headings
    pub settings: SectionHeading,
    /// Clients, in display order
    pub clients: Vec<ClientItem>,
    /// Number of clients
    pub count: u32,
}

/// A client logo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ClientItem {
    pub id: i64,
    pub client_image: String,
    pub client_name: String,
}

//! Contact form and office addresses

use super::careers::SubmissionReceipt;
use super::ListResponse;
use crate::client::XeluxeClient;
use crate::content::is_valid_email;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Contact API interface
#[derive(Clone)]
pub struct ContactApi {
    client: XeluxeClient,
}

impl ContactApi {
    /// Create a new contact API interface
    pub(crate) fn new(client: XeluxeClient) -> Self {
        Self { client }
    }

    /// Send an enquiry.
    ///
    /// The form is validated first; an invalid one fails with
    /// [`ApiError::Validation`] and sends nothing. A `success: false` reply
    /// fails with [`ApiError::Application`] carrying the server's message.
    ///
    /// POST /public-api/contact-form.php (JSON)
    pub async fn submit(&self, form: &ContactForm) -> ApiResult<SubmissionReceipt> {
        form.validate()?;
        self.client
            .post_json("/public-api/contact-form.php", form)
            .await
    }

    /// Office addresses
    ///
    /// GET /public-api/addresses.php
    pub async fn addresses(&self) -> ApiResult<Vec<OfficeAddress>> {
        let response: ListResponse<OfficeAddress> =
            self.client.get("/public-api/addresses.php").await?;
        Ok(response.data)
    }
}

/// Contact form fields, sent as JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    /// Service the enquiry is about (a service category name or slug)
    pub service: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields and email syntax
    pub fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("Name is required"));
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::validation("Please enter a valid email address"));
        }
        if self.message.trim().is_empty() {
            return Err(ApiError::validation("Message is required"));
        }
        Ok(())
    }
}

/// An office
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeAddress {
    /// Row id
    pub id: i64,
    /// City or office label
    pub location: String,
    /// Postal address, possibly multi-line
    pub address: String,
    /// Sort key
    pub display_order: i32,
}

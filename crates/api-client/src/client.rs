//! Main API client implementation
//!
//! Every call runs the same pipeline: send, require a 2xx status, parse the
//! body as JSON, reject payloads carrying `"success": false`, then decode
//! into the caller's type.

use crate::config::ClientConfig;
use crate::endpoints::{
    AboutApi, BlogApi, CareersApi, ClientsApi, ContactApi, ProjectsApi, RecognitionsApi, SeoApi,
    ServicesApi, SettingsApi,
};
use crate::error::{ApiError, ApiResult, ErrorContext};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument};
use uuid::Uuid;
use xeluxe_core::retry::retry_transient;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Xeluxe content API client
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Clone)]
pub struct XeluxeClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl XeluxeClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("xeluxe-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Full URL for an endpoint path (plain concatenation)
    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access site settings
    #[must_use]
    pub fn settings(&self) -> SettingsApi {
        SettingsApi::new(self.clone())
    }

    /// Access the About Us page content
    #[must_use]
    pub fn about(&self) -> AboutApi {
        AboutApi::new(self.clone())
    }

    /// Access service categories and service details
    #[must_use]
    pub fn services(&self) -> ServicesApi {
        ServicesApi::new(self.clone())
    }

    /// Access projects and sectors
    #[must_use]
    pub fn projects(&self) -> ProjectsApi {
        ProjectsApi::new(self.clone())
    }

    /// Access blog posts
    #[must_use]
    pub fn blog(&self) -> BlogApi {
        BlogApi::new(self.clone())
    }

    /// Access job postings and applications
    #[must_use]
    pub fn careers(&self) -> CareersApi {
        CareersApi::new(self.clone())
    }

    /// Access the client showcase
    #[must_use]
    pub fn clients(&self) -> ClientsApi {
        ClientsApi::new(self.clone())
    }

    /// Access recognitions and certificates
    #[must_use]
    pub fn recognitions(&self) -> RecognitionsApi {
        RecognitionsApi::new(self.clone())
    }

    /// Access the contact form and office addresses
    #[must_use]
    pub fn contact(&self) -> ContactApi {
        ContactApi::new(self.clone())
    }

    /// Access per-page SEO metadata
    #[must_use]
    pub fn seo(&self) -> SeoApi {
        SeoApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request against `base_url + endpoint`
    #[instrument(skip(self), fields(request_id))]
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let request = self.inner.get(self.url_for(endpoint));
        self.execute("GET", endpoint, request).await
    }

    /// Perform a GET request, retrying transient failures under the
    /// configured retry policy
    pub async fn get_with_retry<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        retry_transient(&self.config.retry, || self.get(endpoint))
            .await
            .map(|outcome| outcome.value)
    }

    /// Perform a POST request with a JSON body
    #[instrument(skip(self, body), fields(request_id))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.inner.post(self.url_for(endpoint)).json(body);
        self.execute("POST", endpoint, request).await
    }

    /// Perform a POST request with a multipart form body
    #[instrument(skip(self, form), fields(request_id))]
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: Form,
    ) -> ApiResult<T> {
        let request = self.inner.post(self.url_for(endpoint)).multipart(form);
        self.execute("POST", endpoint, request).await
    }

    /// Run a request through the pipeline, logging any failure
    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        endpoint: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let start = Instant::now();
        let result = send_and_decode(request.header(X_REQUEST_ID, &request_id)).await;

        match &result {
            Ok(_) => debug!(
                request_id = %request_id,
                endpoint = %endpoint,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Request succeeded"
            ),
            Err(e) => {
                let context = ErrorContext {
                    request_id: Some(request_id.clone()),
                    endpoint: endpoint.to_string(),
                    method: method.to_string(),
                };
                error!(
                    endpoint = %endpoint,
                    kind = e.kind(),
                    context = %context,
                    error = %e,
                    "API Error"
                );
            }
        }

        result
    }
}

/// Send a request and decode its payload
async fn send_and_decode<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Http {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let payload: Value = serde_json::from_str(&body)?;
    check_success(&payload)?;

    Ok(serde_json::from_value(payload)?)
}

/// Reject payloads that report `"success": false`
pub(crate) fn check_success(payload: &Value) -> ApiResult<()> {
    if payload.get("success") == Some(&Value::Bool(false)) {
        return Err(ApiError::application(
            payload.get("message").and_then(Value::as_str),
        ));
    }
    Ok(())
}

//! Client library for the Xeluxe public content API
//!
//! This crate wraps the PHP content API behind the Xeluxe website in typed,
//! async facades, and adds the state holders pages use to track loading,
//! errors and form submissions.
//!
//! # Features
//!
//! - **Single request pipeline**: every call fails with one of a fixed set of
//!   [`ApiError`] kinds (network, HTTP status, parse, application)
//! - **Retry with exponential backoff**: opt-in through
//!   [`XeluxeClient::get_with_retry`] or [`xeluxe_core::retry`]
//! - **Response cache**: opt-in TTL cache over persistent storage
//!   ([`xeluxe_core::cache::ResponseCache`])
//! - **State holders**: [`state::Query`], [`state::LazyQuery`] and
//!   [`state::Mutation`] publish every transition on a watch channel
//! - **Request correlation**: each request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use xeluxe_api_client::{ClientConfig, XeluxeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_base_url("https://xeluxe.example");
//!     let client = XeluxeClient::with_config(config)?;
//!
//!     let settings = client.settings().get().await?;
//!     println!("Site name: {:?}", settings.value("site_name"));
//!
//!     let categories = client.services().categories().await?;
//!     println!("Got {} service categories", categories.data.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod content;
pub mod endpoints;
pub mod error;
pub mod menu;
pub mod site;
pub mod state;

pub use client::XeluxeClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::XeluxeClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{
        AboutApi, BlogApi, CareersApi, ClientsApi, ContactApi, ProjectsApi, RecognitionsApi,
        SeoApi, ServicesApi, SettingsApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::menu::{DropdownItem, NavItem, NestedItem};
    pub use crate::site::SiteServices;
    pub use crate::state::{LazyQuery, Mutation, Query, RequestState, SubmissionState};
}

//! Site-wide data shared by every page
//!
//! [`SiteServices`] is built once per client and handed to whatever needs
//! the settings or the header menus. It owns one [`Query`] per resource so
//! every consumer observes the same loading and error state.

use crate::client::XeluxeClient;
use crate::endpoints::projects::ProjectCategory;
use crate::endpoints::services::ServiceCategory;
use crate::endpoints::settings::SettingsBundle;
use crate::error::ApiResult;
use crate::menu::{self, NavItem};
use crate::state::{Query, RequestState};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tracing::{info, warn};

type BoxedFetch<T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send>>;
type FetchFn<T> = Box<dyn Fn(()) -> BoxedFetch<T> + Send + Sync>;

/// Dependency-free query over one site-wide resource
pub type SiteQuery<T> = Query<T, FetchFn<T>, ()>;

fn site_query<T, Fut>(fetch: impl Fn() -> Fut + Send + Sync + 'static) -> SiteQuery<T>
where
    T: Clone,
    Fut: Future<Output = ApiResult<T>> + Send + 'static,
{
    let fetch: FetchFn<T> = Box::new(move |()| -> BoxedFetch<T> { Box::pin(fetch()) });
    Query::new(fetch)
}

/// Settings and header menus for the whole site
#[derive(Clone)]
pub struct SiteServices {
    settings: SiteQuery<SettingsBundle>,
    service_menu: SiteQuery<Vec<ServiceCategory>>,
    project_menu: SiteQuery<Vec<ProjectCategory>>,
}

impl fmt::Debug for SiteServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteServices")
            .field("settings", &self.settings.state().loading)
            .field("service_menu", &self.service_menu.state().loading)
            .field("project_menu", &self.project_menu.state().loading)
            .finish()
    }
}

impl SiteServices {
    /// Create idle queries against `client`; nothing is fetched until
    /// [`SiteServices::load_all`]
    pub fn new(client: &XeluxeClient) -> Self {
        let settings_api = client.settings();
        let services_api = client.services();
        let projects_api = client.projects();

        Self {
            settings: site_query(move || {
                let api = settings_api.clone();
                async move { api.get().await }
            }),
            service_menu: site_query(move || {
                let api = services_api.clone();
                async move { api.categories().await.map(|list| list.data) }
            }),
            project_menu: site_query(move || {
                let api = projects_api.clone();
                async move { api.categories().await.map(|list| list.data) }
            }),
        }
    }

    /// Fetch all three resources concurrently.
    ///
    /// Each resource runs only on its first load; use
    /// [`SiteServices::refresh`] to fetch again.
    pub async fn load_all(&self) {
        tokio::join!(
            self.settings.mount(()),
            self.service_menu.mount(()),
            self.project_menu.mount(()),
        );
        self.log_failures();
    }

    /// Fetch all three resources again
    pub async fn refresh(&self) {
        tokio::join!(
            self.settings.refetch(),
            self.service_menu.refetch(),
            self.project_menu.refetch(),
        );
        self.log_failures();
    }

    fn log_failures(&self) {
        let failures = [
            ("settings", self.settings.state().error_message()),
            ("service_menu", self.service_menu.state().error_message()),
            ("project_menu", self.project_menu.state().error_message()),
        ];

        let mut failed = 0;
        for (resource, error) in failures {
            if let Some(error) = error {
                warn!(resource, %error, "Failed to load site data");
                failed += 1;
            }
        }

        if failed == 0 {
            info!("Site data loaded");
        }
    }

    /// Settings query
    pub fn settings(&self) -> &SiteQuery<SettingsBundle> {
        &self.settings
    }

    /// Service menu query
    pub fn service_menu(&self) -> &SiteQuery<Vec<ServiceCategory>> {
        &self.service_menu
    }

    /// Project menu query
    pub fn project_menu(&self) -> &SiteQuery<Vec<ProjectCategory>> {
        &self.project_menu
    }

    /// Flat setting value by key, once settings have loaded
    pub fn setting(&self, key: &str) -> Option<String> {
        self.settings
            .state()
            .data
            .and_then(|bundle| bundle.parsed.get(key).cloned())
    }

    /// Header navigation from whatever menus have loaded; a menu that has
    /// not loaded yields an empty dropdown
    pub fn navigation(&self) -> Vec<NavItem> {
        let services = loaded_or_empty(self.service_menu.state());
        let sectors = loaded_or_empty(self.project_menu.state());
        menu::primary_navigation(&services, &sectors)
    }
}

fn loaded_or_empty<T>(state: RequestState<Vec<T>>) -> Vec<T> {
    state.data.unwrap_or_default()
}

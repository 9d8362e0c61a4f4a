//! Header navigation built from the service and project menus
//!
//! The primary navigation is fixed except for two dropdowns:
//!
//! - **Services**: one entry per service category. A category with exactly
//!   one service links straight to it; any other category becomes a nested
//!   dropdown of its services.
//! - **Sectors**: one entry per project category that has projects, linking
//!   to the sector page.

use crate::endpoints::projects::ProjectCategory;
use crate::endpoints::services::ServiceCategory;
use serde::Serialize;

/// Placeholder href for dropdown entries that only open a nested menu
pub const NESTED_PLACEHOLDER_HREF: &str = "#";

/// Top-level navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display label
    pub name: String,
    /// Route path
    pub href: String,
    /// Dropdown entries, empty for plain links
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropdown: Vec<DropdownItem>,
}

impl NavItem {
    /// Plain link without a dropdown
    pub fn link(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
            dropdown: Vec::new(),
        }
    }

    /// Link with dropdown entries
    #[must_use]
    pub fn with_dropdown(mut self, dropdown: Vec<DropdownItem>) -> Self {
        self.dropdown = dropdown;
        self
    }

    /// Whether the item opens a dropdown
    pub fn has_dropdown(&self) -> bool {
        !self.dropdown.is_empty()
    }
}

/// Second-level dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownItem {
    /// Display label
    pub name: String,
    /// Route path, or [`NESTED_PLACEHOLDER_HREF`] when the entry only opens `nested`
    pub href: String,
    /// Third-level entries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<NestedItem>,
}

impl DropdownItem {
    /// Whether the entry opens a nested dropdown
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }
}

/// Third-level dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedItem {
    /// Display label
    pub name: String,
    /// Route path
    pub href: String,
}

fn service_href(slug: &str) -> String {
    format!("/service/{slug}")
}

/// Dropdown entries for the Services menu
pub fn service_dropdown(categories: &[ServiceCategory]) -> Vec<DropdownItem> {
    categories
        .iter()
        .map(|category| match category.services.as_slice() {
            [only] => DropdownItem {
                name: category.category_name.clone(),
                href: service_href(&only.slug),
                nested: Vec::new(),
            },
            services => DropdownItem {
                name: category.category_name.clone(),
                href: NESTED_PLACEHOLDER_HREF.to_string(),
                nested: services
                    .iter()
                    .map(|service| NestedItem {
                        name: service.title.clone(),
                        href: service_href(&service.slug),
                    })
                    .collect(),
            },
        })
        .collect()
}

/// Dropdown entries for the Sectors menu; categories without projects are hidden
pub fn sector_dropdown(categories: &[ProjectCategory]) -> Vec<DropdownItem> {
    categories
        .iter()
        .filter(|category| !category.projects.is_empty())
        .map(|category| DropdownItem {
            name: category.category_name.clone(),
            href: format!("/sector/{}", category.slug),
            nested: Vec::new(),
        })
        .collect()
}

/// The full header navigation
pub fn primary_navigation(
    services: &[ServiceCategory],
    sectors: &[ProjectCategory],
) -> Vec<NavItem> {
    vec![
        NavItem::link("Home", "/"),
        NavItem::link("About Us", "/about-us"),
        NavItem::link("Services", "/services").with_dropdown(service_dropdown(services)),
        NavItem::link("Sectors", "/sectors").with_dropdown(sector_dropdown(sectors)),
        NavItem::link("Projects", "/projects"),
        NavItem::link("Insights", "/blog"),
        NavItem::link("Careers", "/careers"),
        NavItem::link("Contact Us", "/contact-us"),
    ]
}

/// Whether `item` should be highlighted while `path` is the current route.
///
/// Detail pages highlight their listing: `/service/..` under Services,
/// `/project/..` under Projects, `/blog-details..` under Insights and
/// `/career-details/..` under Careers.
pub fn is_active(item: &NavItem, path: &str) -> bool {
    if path == item.href {
        return true;
    }

    match item.href.as_str() {
        "/services" => path.starts_with("/service/"),
        "/projects" => path.starts_with("/project/"),
        "/blog" => path.starts_with("/blog-details"),
        "/careers" => path.starts_with("/career-details/"),
        _ => false,
    }
}

/// Whether a nested dropdown whose bottom edge sits at `bottom` would
/// overflow a viewport `viewport_height` tall and should open upward
pub fn should_flip_up(bottom: f64, viewport_height: f64) -> bool {
    bottom > viewport_height
}

//! Site-wide content: settings, about, clients, recognitions, offices, SEO, menu

use crate::context::Context;
use crate::output;
use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use xeluxe_api_client::content::extract_excerpt;
use xeluxe_api_client::endpoints::seo::page_identifier;
use xeluxe_api_client::menu::{self, NavItem};
use xeluxe_api_client::site::SiteServices;

/// Show settings, one key, or the grouped view
pub async fn settings(ctx: &Context, key: Option<&str>, grouped: bool) -> Result<()> {
    let api = ctx.client.settings();
    let bundle = ctx.fetch("settings", || api.get()).await?;

    if let Some(key) = key {
        let Some(value) = bundle.value(key) else {
            bail!("Setting {key:?} not found");
        };
        if ctx.json() {
            return output::json(&serde_json::json!({ key: value }));
        }
        println!("{value}");
        return Ok(());
    }

    if ctx.json() {
        return if grouped {
            output::json(&bundle.groups)
        } else {
            output::json(&bundle.parsed)
        };
    }

    output::banner("Site Settings");
    if grouped {
        for (group, entries) in &bundle.groups {
            output::section(group);
            for (key, value) in entries {
                output::field(key, value);
            }
        }
    } else {
        for (key, value) in &bundle.parsed {
            output::field(key, value);
        }
    }
    println!();
    Ok(())
}

/// Show the About Us page
pub async fn about(ctx: &Context) -> Result<()> {
    let api = ctx.client.about();
    let about = ctx.fetch("about", || api.get()).await?;

    if ctx.json() {
        return output::json(&about);
    }

    output::banner(&about.about_us.page_title);
    output::field("Subtitle", &about.about_us.page_subtitle);
    output::field("Quote", &about.about_us.quote_text);

    output::section(&about.vision_mission.section_title);
    output::field("Vision", &extract_excerpt(&about.vision_mission.vision_content, 120));
    output::field("Mission", &extract_excerpt(&about.vision_mission.mission_content, 120));

    output::section(&format!(
        "Values ({})",
        output::count(about.values.len(), "value", "values")
    ));
    for value in &about.values {
        output::item(&value.title, &value.subtitle);
    }

    output::section(&about.leadership.leadership_title);
    for member in &about.team_members {
        output::item(&member.name, &member.designation);
    }
    println!();
    Ok(())
}

/// List client logos
pub async fn clients(ctx: &Context) -> Result<()> {
    let api = ctx.client.clients();
    let page = ctx.fetch("clients", || api.list()).await?;

    if ctx.json() {
        return output::json(&page);
    }

    output::banner(&page.settings.page_title);
    for client in &page.clients {
        output::item(&client.client_name, &client.client_image);
    }
    println!();
    Ok(())
}

/// List recognitions and certificates
pub async fn recognitions(ctx: &Context) -> Result<()> {
    let api = ctx.client.recognitions();
    let page = ctx.fetch("recognitions", || api.list()).await?;

    if ctx.json() {
        return output::json(&page);
    }

    output::banner(&page.settings.page_title);
    for recognition in &page.recognitions {
        output::item(&recognition.recognition_title, &recognition.organization_name);
    }
    println!();
    Ok(())
}

/// List office addresses
pub async fn addresses(ctx: &Context) -> Result<()> {
    let api = ctx.client.contact();
    let offices = ctx.fetch("addresses", || api.addresses()).await?;

    if ctx.json() {
        return output::json(&offices);
    }

    output::banner("Offices");
    for office in &offices {
        output::field(&office.location, &office.address);
    }
    println!();
    Ok(())
}

/// Show SEO metadata for a route path or a raw page identifier
pub async fn seo(ctx: &Context, target: &str, raw_identifier: bool) -> Result<()> {
    let identifier = if raw_identifier {
        target.to_string()
    } else {
        page_identifier(target)
    };

    let api = ctx.client.seo();
    let data = ctx
        .fetch(&format!("seo:{identifier}"), || api.page(&identifier))
        .await?;

    if ctx.json() {
        return output::json(&data);
    }

    output::banner(&format!("SEO: {identifier}"));
    output::field("Page", &data.page_name);
    output::field("Title", data.meta_title.as_deref().unwrap_or_default());
    output::field(
        "Description",
        data.meta_description.as_deref().unwrap_or_default(),
    );
    output::field("Keywords", data.meta_keywords.as_deref().unwrap_or_default());
    output::field("Canonical", data.canonical_url.as_deref().unwrap_or_default());
    output::field("Robots", &data.robots());
    output::field("OG title", data.og_title.as_deref().unwrap_or_default());
    output::field("OG image", data.og_image.as_deref().unwrap_or_default());
    println!();
    Ok(())
}

/// Print the header navigation, marking the item active for `active_path`
pub async fn menu(ctx: &Context, active_path: Option<&str>) -> Result<()> {
    let site = SiteServices::new(&ctx.client);
    site.load_all().await;

    for (name, message) in [
        ("service", site.service_menu().state().error_message()),
        ("project", site.project_menu().state().error_message()),
    ] {
        if let Some(message) = message {
            output::warning(&format!("The {name} menu failed to load: {message}"));
        }
    }

    let navigation = site.navigation();

    if ctx.json() {
        return output::json(&navigation);
    }

    output::banner("Navigation");
    for item in &navigation {
        print_nav_item(item, active_path);
    }
    println!();
    Ok(())
}

fn print_nav_item(item: &NavItem, active_path: Option<&str>) {
    let active = active_path.is_some_and(|path| menu::is_active(item, path));
    if active {
        println!("  {} {}", item.name.green().bold(), item.href.dimmed());
    } else {
        println!("  {} {}", item.name, item.href.dimmed());
    }

    for entry in &item.dropdown {
        if entry.has_nested() {
            println!("    ▸ {}", entry.name);
            for nested in &entry.nested {
                println!("        {} {}", nested.name, nested.href.dimmed());
            }
        } else {
            println!("    {} {}", entry.name, entry.href.dimmed());
        }
    }
}

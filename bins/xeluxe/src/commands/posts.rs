//! Insights and careers

use crate::context::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use xeluxe_api_client::content::{extract_excerpt, format_date, DEFAULT_EXCERPT_LENGTH};
use xeluxe_api_client::endpoints::blog::BlogFilters;
use xeluxe_api_client::endpoints::careers::{CareerFilters, Lookup};
use xeluxe_api_client::endpoints::Pagination;

fn print_pagination(pagination: &Pagination) {
    if pagination.total_pages == 0 {
        return;
    }
    println!();
    println!(
        "  {}",
        format!(
            "Page {} of {} ({} total)",
            pagination.current_page, pagination.total_pages, pagination.total_items
        )
        .dimmed()
    );
}

/// List insights matching `filters`
pub async fn blog(ctx: &Context, filters: &BlogFilters) -> Result<()> {
    let api = ctx.client.blog();
    let list = ctx.fetch(&filters.to_path(), || api.list(filters)).await?;

    if ctx.json() {
        return output::json(&list);
    }

    output::banner("Insights");
    for post in &list.data {
        output::item(&post.title, &format_date(&post.created_at));
    }
    print_pagination(&list.pagination);
    println!();
    Ok(())
}

/// Show one insight
pub async fn post(ctx: &Context, slug: &str) -> Result<()> {
    let api = ctx.client.blog();
    let page = ctx
        .fetch(&format!("blog:{slug}"), || api.by_slug(slug))
        .await?;

    if ctx.json() {
        return output::json(&page);
    }

    let post = &page.blog;
    output::banner(&post.title);
    output::field("Published", &format_date(&post.created_at));
    output::field("Type", &post.blog_type);
    output::field("Sector", post.sector_name.as_deref().unwrap_or_default());
    output::field("Service", post.service_name.as_deref().unwrap_or_default());
    output::field("Excerpt", &extract_excerpt(&post.content, DEFAULT_EXCERPT_LENGTH));

    if !page.other_blogs.is_empty() {
        output::section("Read next");
        for other in &page.other_blogs {
            output::item(&other.title, &format!("/blog-details/{}", other.slug));
        }
    }
    println!();
    Ok(())
}

/// List open positions matching `filters`
pub async fn careers(ctx: &Context, filters: &CareerFilters) -> Result<()> {
    let api = ctx.client.careers();
    let list = ctx.fetch(&filters.to_path(), || api.list(filters)).await?;

    if ctx.json() {
        return output::json(&list);
    }

    output::banner("Careers");
    for career in &list.data {
        output::item(
            &career.title,
            &format!("{} · {}", career.location.name, career.employment_type),
        );
    }
    print_pagination(&list.pagination);
    println!();
    Ok(())
}

/// Show one position
pub async fn career(ctx: &Context, slug: &str) -> Result<()> {
    let api = ctx.client.careers();
    let career = ctx
        .fetch(&format!("career:{slug}"), || api.by_slug(slug))
        .await?;

    if ctx.json() {
        return output::json(&career);
    }

    output::banner(&career.title);
    output::field("Job ID", &career.id.to_string());
    output::field("Department", &career.department.name);
    output::field("Location", &career.location.name);
    output::field("Experience", &career.experience_level.name);
    output::field("Type", &career.employment_type);
    if let Some(salary) = &career.salary_range {
        output::field("Salary", &salary.name);
    }
    output::field(
        "Description",
        &extract_excerpt(&career.content, DEFAULT_EXCERPT_LENGTH),
    );
    println!();
    Ok(())
}

/// List departments, locations and experience levels
pub async fn lookups(ctx: &Context) -> Result<()> {
    let api = ctx.client.careers();
    let (departments, locations, levels) = tokio::try_join!(
        ctx.fetch("departments", || api.departments()),
        ctx.fetch("locations", || api.locations()),
        ctx.fetch("experience-levels", || api.experience_levels()),
    )?;

    if ctx.json() {
        return output::json(&serde_json::json!({
            "departments": departments,
            "locations": locations,
            "experience_levels": levels,
        }));
    }

    output::banner("Career Filters");
    for (title, entries) in [
        ("Departments", &departments),
        ("Locations", &locations),
        ("Experience levels", &levels),
    ] {
        print_lookups(title, entries);
    }
    println!();
    Ok(())
}

fn print_lookups(title: &str, entries: &[Lookup]) {
    output::section(title);
    for entry in entries {
        output::item(&entry.name, &format!("id {}", entry.id));
    }
}

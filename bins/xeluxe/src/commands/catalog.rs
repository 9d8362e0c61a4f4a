//! Services, projects and sectors

use crate::context::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use xeluxe_api_client::content::{extract_excerpt, DEFAULT_EXCERPT_LENGTH};

/// List service categories with their services
pub async fn services(ctx: &Context) -> Result<()> {
    let api = ctx.client.services();
    let categories = ctx.fetch("service-categories", || api.categories()).await?;

    if ctx.json() {
        return output::json(&categories.data);
    }

    output::banner("Services");
    for category in &categories.data {
        output::section(&format!(
            "{} {}",
            category.category_name,
            output::count(category.services.len(), "service", "services").dimmed()
        ));
        for service in &category.services {
            output::item(&service.title, &format!("/service/{}", service.slug));
        }
    }
    println!();
    Ok(())
}

/// Show one service
pub async fn service(ctx: &Context, slug: &str) -> Result<()> {
    let api = ctx.client.services();
    let page = ctx
        .fetch(&format!("service:{slug}"), || api.by_slug(slug))
        .await?;

    if ctx.json() {
        return output::json(&page);
    }

    let service = &page.service;
    output::banner(&service.title);
    output::field("Category", &service.category_name);
    output::field("Summary", &service.short_description);
    output::field(
        "Content",
        &extract_excerpt(&service.content, DEFAULT_EXCERPT_LENGTH),
    );

    if !page.related_services.is_empty() {
        output::section("Related services");
        for related in &page.related_services {
            output::item(&related.title, &format!("/service/{}", related.slug));
        }
    }
    println!();
    Ok(())
}

/// List projects: by category, featured, or the category menu
pub async fn projects(ctx: &Context, category: Option<&str>, featured: bool) -> Result<()> {
    let api = ctx.client.projects();

    if let Some(category) = category {
        let projects = ctx
            .fetch(&format!("projects:{category}"), || api.by_category(category))
            .await?;
        if ctx.json() {
            return output::json(&projects);
        }

        output::banner(&format!("Projects in {category}"));
        for project in &projects {
            output::item(&project.title, &project.location);
        }
        println!();
        return Ok(());
    }

    if featured {
        let projects = ctx.fetch("featured-projects", || api.featured()).await?;
        if ctx.json() {
            return output::json(&projects.data);
        }

        output::banner("Featured Projects");
        for project in &projects.data {
            output::item(&project.title, &format!("/project/{}", project.slug));
        }
        println!();
        return Ok(());
    }

    let categories = ctx.fetch("project-categories", || api.categories()).await?;
    if ctx.json() {
        return output::json(&categories.data);
    }

    output::banner("Projects");
    for category in &categories.data {
        output::section(&format!(
            "{} {}",
            category.category_name,
            output::count(category.projects.len(), "project", "projects").dimmed()
        ));
        for project in &category.projects {
            output::item(&project.title, &format!("/project/{}", project.slug));
        }
    }
    println!();
    Ok(())
}

/// Show one project
pub async fn project(ctx: &Context, slug: &str) -> Result<()> {
    let api = ctx.client.projects();
    let page = ctx
        .fetch(&format!("project:{slug}"), || api.by_slug(slug))
        .await?;

    if ctx.json() {
        return output::json(&page);
    }

    let project = &page.project;
    output::banner(&project.title);
    output::field("Location", &project.location);
    output::field("Summary", &project.short_description);

    if !page.related_projects.is_empty() {
        output::section("Related projects");
        for related in &page.related_projects {
            output::item(&related.title, &related.location);
        }
    }
    println!();
    Ok(())
}

/// List sectors, optionally with their projects or only the featured ones
pub async fn sectors(ctx: &Context, with_projects: bool, featured: bool) -> Result<()> {
    let api = ctx.client.projects();

    if featured {
        let sectors = ctx.fetch("featured-sectors", || api.featured_sectors()).await?;
        if ctx.json() {
            return output::json(&sectors.data);
        }

        output::banner("Featured Sectors");
        for sector in &sectors.data {
            output::item(&sector.title, &format!("/sector/{}", sector.slug));
        }
        println!();
        return Ok(());
    }

    if with_projects {
        let sectors = ctx
            .fetch("sectors-with-projects", || api.sectors_with_projects())
            .await?;
        if ctx.json() {
            return output::json(&sectors);
        }

        output::banner("Sectors");
        for entry in &sectors {
            output::section(&entry.sector.category_name);
            for project in &entry.projects {
                output::item(&project.title, &project.location);
            }
        }
        println!();
        return Ok(());
    }

    let sectors = ctx.fetch("sectors", || api.sectors()).await?;
    if ctx.json() {
        return output::json(&sectors.data);
    }

    output::banner("Sectors");
    for sector in &sectors.data {
        output::item(&sector.category_name, &format!("/sector/{}", sector.slug));
    }
    println!();
    Ok(())
}

/// Show one sector
pub async fn sector(ctx: &Context, slug: &str) -> Result<()> {
    let api = ctx.client.projects();
    let page = ctx
        .fetch(&format!("sector:{slug}"), || api.sector_by_slug(slug))
        .await?;

    if ctx.json() {
        return output::json(&page);
    }

    output::banner(&page.sector.category_name);
    output::field("Summary", &page.sector.short_description);
    output::section(&output::count(
        page.featured_projects.len(),
        "featured project",
        "featured projects",
    ));
    for project in &page.featured_projects {
        output::item(&project.title, &project.location);
    }
    println!();
    Ok(())
}

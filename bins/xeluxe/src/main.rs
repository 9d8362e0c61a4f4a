//! Xeluxe content CLI
//!
//! Reads the public content API from the terminal: settings, menus,
//! services, projects, insights, careers and SEO data. It can also submit
//! the contact and job application forms and manage the local response cache.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use xeluxe_api_client::endpoints::blog::BlogFilters;
use xeluxe_api_client::endpoints::careers::CareerFilters;
use xeluxe_api_client::endpoints::contact::ContactForm;

mod commands;
mod context;
mod output;

use commands::{cache, catalog, forms, posts, site};
use context::{Context, Options};

/// Command-line access to the Xeluxe content API
#[derive(Parser)]
#[command(name = "xeluxe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Configuration file (defaults to .xeluxe.toml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Base URL of the content API
    #[arg(long, global = true, env = "XELUXE_API_BASE_URL")]
    base_url: Option<String>,

    /// Serve responses from the local cache when fresh
    #[arg(long, global = true)]
    cached: bool,

    /// Cache directory
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Retries for transient failures (overrides the configuration file)
    #[arg(long, global = true)]
    retries: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show site settings
    Settings {
        /// Print a single setting
        key: Option<String>,

        /// Show settings by group
        #[arg(short, long)]
        grouped: bool,
    },

    /// Show the About Us page
    About,

    /// List service categories and services
    Services,

    /// Show one service
    Service {
        /// Service slug
        slug: String,
    },

    /// List projects
    Projects {
        /// Only projects in this category
        #[arg(long)]
        category: Option<String>,

        /// Only featured projects
        #[arg(long, conflicts_with = "category")]
        featured: bool,
    },

    /// Show one project
    Project {
        /// Project slug
        slug: String,
    },

    /// List sectors
    Sectors {
        /// Include each sector's projects, hiding empty sectors
        #[arg(long)]
        with_projects: bool,

        /// Only featured sectors
        #[arg(long, conflicts_with = "with_projects")]
        featured: bool,
    },

    /// Show one sector
    Sector {
        /// Sector slug
        slug: String,
    },

    /// List insights
    Blog {
        /// Post type (news, case-study, ...)
        #[arg(long = "type")]
        blog_type: Option<String>,

        /// Sector ID
        #[arg(long)]
        sector: Option<i64>,

        /// Service ID
        #[arg(long)]
        service: Option<i64>,

        /// Sort order
        #[arg(long)]
        sort: Option<String>,

        /// Page number
        #[arg(short, long)]
        page: Option<u32>,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show one insight
    Post {
        /// Post slug
        slug: String,
    },

    /// List open positions
    Careers {
        /// Department ID
        #[arg(long)]
        department: Option<i64>,

        /// Location ID
        #[arg(long)]
        location: Option<i64>,

        /// Experience level ID
        #[arg(long)]
        experience: Option<i64>,

        /// Page number
        #[arg(short, long)]
        page: Option<u32>,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show one position
    Career {
        /// Position slug
        slug: String,
    },

    /// List departments, locations and experience levels
    Lookups,

    /// List client logos
    Clients,

    /// List recognitions and certificates
    Recognitions,

    /// List office addresses
    Addresses,

    /// Show SEO metadata for a route
    Seo {
        /// Route path such as /about-us
        #[arg(default_value = "/")]
        target: String,

        /// Treat the target as a page identifier instead of a path
        #[arg(long)]
        identifier: bool,
    },

    /// Print the header navigation
    Menu {
        /// Highlight the item active for this route
        #[arg(long)]
        active: Option<String>,
    },

    /// Send a contact enquiry
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        company: String,

        /// Service the enquiry is about
        #[arg(long, default_value = "")]
        service: String,
    },

    /// Apply for a position
    Apply {
        /// Position ID (see `xeluxe career <slug>`)
        #[arg(long)]
        job_id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        cover_letter: String,

        /// Resume file (PDF or Word, at most 5 MB)
        #[arg(long)]
        resume: PathBuf,
    },

    /// Manage the local response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show cache statistics
    Stats,

    /// Remove every entry
    Clear,

    /// Remove expired entries
    Purge,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("xeluxe=debug,xeluxe_api_client=debug,xeluxe_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let options = Options {
        config: cli.config,
        base_url: cli.base_url,
        cached: cli.cached,
        cache_dir: cli.cache_dir,
        retries: cli.retries,
        format: cli.format,
    };
    let ctx = Context::from_options(&options)?;

    match cli.command {
        Commands::Settings { key, grouped } => site::settings(&ctx, key.as_deref(), grouped).await,
        Commands::About => site::about(&ctx).await,
        Commands::Clients => site::clients(&ctx).await,
        Commands::Recognitions => site::recognitions(&ctx).await,
        Commands::Addresses => site::addresses(&ctx).await,
        Commands::Seo { target, identifier } => site::seo(&ctx, &target, identifier).await,
        Commands::Menu { active } => site::menu(&ctx, active.as_deref()).await,

        Commands::Services => catalog::services(&ctx).await,
        Commands::Service { slug } => catalog::service(&ctx, &slug).await,
        Commands::Projects { category, featured } => {
            catalog::projects(&ctx, category.as_deref(), featured).await
        }
        Commands::Project { slug } => catalog::project(&ctx, &slug).await,
        Commands::Sectors { with_projects, featured } => {
            catalog::sectors(&ctx, with_projects, featured).await
        }
        Commands::Sector { slug } => catalog::sector(&ctx, &slug).await,

        Commands::Blog { blog_type, sector, service, sort, page, limit } => {
            let filters = BlogFilters {
                blog_type,
                sector_id: sector,
                service_id: service,
                sort,
                page,
                limit,
            };
            posts::blog(&ctx, &filters).await
        }
        Commands::Post { slug } => posts::post(&ctx, &slug).await,
        Commands::Careers { department, location, experience, page, limit } => {
            let filters = CareerFilters {
                department_id: department,
                location_id: location,
                experience_level_id: experience,
                page,
                limit,
            };
            posts::careers(&ctx, &filters).await
        }
        Commands::Career { slug } => posts::career(&ctx, &slug).await,
        Commands::Lookups => posts::lookups(&ctx).await,

        Commands::Contact { name, email, message, phone, company, service } => {
            let form = ContactForm {
                name,
                email,
                phone,
                company,
                service,
                message,
            };
            forms::contact(&ctx, form).await
        }
        Commands::Apply { job_id, name, email, phone, cover_letter, resume } => {
            forms::apply(&ctx, job_id, name, email, phone, cover_letter, &resume).await
        }

        Commands::Cache { action } => match action {
            CacheAction::Stats => cache::stats(&ctx),
            CacheAction::Clear => cache::clear(&ctx),
            CacheAction::Purge => cache::purge(&ctx),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

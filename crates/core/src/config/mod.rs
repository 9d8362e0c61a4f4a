//! Configuration loading and schema definitions
//!
//! Settings live in `.xeluxe.toml` with `[api]`, `[cache]` and `[retry]`
//! sections.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_CANDIDATES};
pub use schema::*;

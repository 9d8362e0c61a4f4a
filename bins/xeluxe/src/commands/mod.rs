//! CLI command implementations

pub mod cache;
pub mod catalog;
pub mod forms;
pub mod posts;
pub mod site;

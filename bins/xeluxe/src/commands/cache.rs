//! Local response cache maintenance

use crate::context::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use xeluxe_api_client::content::format_file_size;

/// Show cache statistics
pub fn stats(ctx: &Context) -> Result<()> {
    let cache = ctx.cache_store()?;
    let stats = cache.stats();

    if ctx.json() {
        return output::json(&stats);
    }

    output::banner("Response Cache");
    output::field("Directory", &cache.storage().dir().display().to_string());
    output::field("Entries", &stats.total_entries.to_string());
    output::field("Expired", &stats.expired_entries.to_string());
    if stats.corrupt_entries > 0 {
        println!(
            "  {:<18} {}",
            "Corrupt:".dimmed(),
            stats.corrupt_entries.to_string().red()
        );
    }
    output::field("Size", &format_file_size(stats.total_size_bytes));
    println!();
    Ok(())
}

/// Remove every cache entry
pub fn clear(ctx: &Context) -> Result<()> {
    let removed = ctx.cache_store()?.clear_all();

    if ctx.json() {
        return output::json(&serde_json::json!({ "removed": removed }));
    }

    output::success(&format!(
        "Cleared {}",
        output::count(removed, "cache entry", "cache entries")
    ));
    Ok(())
}

/// Remove expired cache entries
pub fn purge(ctx: &Context) -> Result<()> {
    let removed = ctx.cache_store()?.purge_expired();

    if ctx.json() {
        return output::json(&serde_json::json!({ "removed": removed }));
    }

    output::success(&format!(
        "Purged {}",
        output::count(removed, "expired entry", "expired entries")
    ));
    Ok(())
}

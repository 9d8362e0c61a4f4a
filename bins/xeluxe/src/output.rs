//! Terminal output helpers

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

const RULE_WIDTH: usize = 72;

/// Print a banner with a title between two rules
pub fn banner(title: &str) {
    let rule = "━".repeat(RULE_WIDTH);
    println!();
    println!("{}", rule.blue());
    println!("  {}", title.blue().bold());
    println!("{}", rule.blue());
    println!();
}

/// Print a subheader
pub fn section(title: &str) {
    println!();
    println!("  {}", title.bold());
}

/// Print a `label: value` line, skipping empty values
pub fn field(label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    println!("  {:<18} {}", format!("{label}:").dimmed(), value);
}

/// Print a bulleted item with an optional dimmed suffix
pub fn item(text: &str, suffix: &str) {
    if suffix.is_empty() {
        println!("  • {text}");
    } else {
        println!("  • {} {}", text, suffix.dimmed());
    }
}

/// Print a success line
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning line to stderr
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Print `value` as pretty JSON
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `1 item` / `3 items`
pub fn count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

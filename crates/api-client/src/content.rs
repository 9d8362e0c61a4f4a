//! Helpers for presenting content returned by the API
//!
//! The CMS stores several list-like fields as delimited text (comma-separated
//! image paths, newline-separated bullet lists, FAQ JSON) and serves image
//! paths relative to the API host. These helpers turn them into values a
//! front end can render directly.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default excerpt length in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .unwrap_or_else(|e| panic!("BUG: Invalid email regex pattern: {e}"))
});

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").unwrap_or_else(|e| panic!("BUG: Invalid tag regex pattern: {e}"))
});

/// Split a comma-separated list of image URLs, dropping blanks
pub fn parse_image_gallery(images: &str) -> Vec<String> {
    split_trimmed(images, ',')
}

/// Split newline-separated text into items, dropping blank lines
pub fn parse_list(text: &str) -> Vec<String> {
    split_trimmed(text, '\n')
}

fn split_trimmed(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Format an API date as `"March 5, 2024"`.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339. Anything else
/// is returned unchanged.
pub fn format_date(date: &str) -> String {
    let trimmed = date.trim();

    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        });

    match parsed {
        Some(day) => day.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Resolve an image path against the API base URL.
///
/// Absolute `http(s)` URLs pass through, `/`-rooted paths get `base_url`
/// prepended, anything else is returned as is.
pub fn image_url(path: &str, base_url: &str) -> String {
    if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        return format!("{base_url}{path}");
    }
    path.to_string()
}

/// Plain-text excerpt of HTML content.
///
/// Tags are stripped. Text longer than `max_len` characters is cut back to
/// the last space within the limit and suffixed with `...`.
pub fn extract_excerpt(html: &str, max_len: usize) -> String {
    let text = TAG_RE.replace_all(html, "");

    if text.chars().count() <= max_len {
        return text.into_owned();
    }

    let truncated: String = text.chars().take(max_len).collect();
    let cut = truncated.rfind(' ').unwrap_or(0);
    format!("{}...", &truncated[..cut])
}

/// Whether `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Human-readable size using 1024-based units, e.g. `"2.5 MB"`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let mut number = format!("{rounded:.2}");
    while number.ends_with('0') {
        number.pop();
    }
    if number.ends_with('.') {
        number.pop();
    }

    format!("{number} {}", UNITS[unit])
}

/// A question and answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    /// Question text
    pub question: String,
    /// Answer text, possibly HTML
    pub answer: String,
}

/// Parse a JSON array of `{question, answer}` objects; anything else is empty
pub fn parse_faqs(json: &str) -> Vec<Faq> {
    serde_json::from_str(json).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_image_gallery() {
        assert_eq!(
            parse_image_gallery(" /a.jpg,/b.jpg , ,"),
            vec!["/a.jpg", "/b.jpg"]
        );
        assert!(parse_image_gallery("").is_empty());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("Fire strategy\n\n  CFD modelling \r\nAudits"),
            vec!["Fire strategy", "CFD modelling", "Audits"]
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "March 5, 2024");
        assert_eq!(format_date("2023-12-25 14:30:00"), "December 25, 2023");
        assert_eq!(format_date("2024-01-31T10:00:00+04:00"), "January 31, 2024");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_image_url() {
        let base = "https://cms.example";
        assert_eq!(image_url("/uploads/a.jpg", base), "https://cms.example/uploads/a.jpg");
        assert_eq!(image_url("https://cdn.example/a.jpg", base), "https://cdn.example/a.jpg");
        assert_eq!(image_url("uploads/a.jpg", base), "uploads/a.jpg");
        assert_eq!(image_url("", base), "");
    }

    #[test]
    fn test_extract_excerpt() {
        assert_eq!(extract_excerpt("<p>Short <b>text</b></p>", 150), "Short text");
        assert_eq!(
            extract_excerpt("<p>The quick brown fox jumps</p>", 12),
            "The quick..."
        );
        assert_eq!(extract_excerpt("Unbrokenword", 4), "...");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("info@xeluxe.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("info@xeluxe"));
        assert!(!is_valid_email("info xeluxe@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(2_621_440), "2.5 MB");
        assert_eq!(format_file_size(1_500), "1.46 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_parse_faqs() {
        let faqs = parse_faqs(r#"[{"question": "Q1", "answer": "A1"}]"#);
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].answer, "A1");

        assert!(parse_faqs(r#"{"question": "Q1"}"#).is_empty());
        assert!(parse_faqs("not json").is_empty());
        assert!(parse_faqs("").is_empty());
    }

    proptest! {
        #[test]
        fn prop_list_items_are_trimmed_and_non_empty(text in ".{0,200}") {
            for item in parse_list(&text).iter().chain(parse_image_gallery(&text).iter()) {
                prop_assert!(!item.is_empty());
                prop_assert_eq!(item.trim(), item.as_str());
            }
        }

        #[test]
        fn prop_excerpt_is_bounded(text in "[a-z <>/]{0,400}", max in 1usize..200) {
            let excerpt = extract_excerpt(&text, max);
            prop_assert!(excerpt.chars().count() <= max + 3);
        }
    }
}

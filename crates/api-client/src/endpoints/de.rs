//! Tolerant decoders for loosely typed PHP payloads

use crate::content::parse_image_gallery;
use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;

/// Decode `true`/`false`, `0`/`1`, `"0"`/`"1"`/`"true"`/`"false"` or `null`
/// (as `false`) into a `bool`
pub(crate) fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().map_or(false, |f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" | "no" => Ok(false),
            "1" | "true" | "yes" => Ok(true),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &"a boolean flag",
            )),
        },
        other => Err(de::Error::custom(format!("expected a boolean flag, got {other}"))),
    }
}

/// Decode a string, treating `null` as empty
pub(crate) fn nullable_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an image list sent either as a JSON array or as a comma-separated
/// string; `null` is empty
pub(crate) fn string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(parse_image_gallery(&s)),
        Value::Array(items) => Ok(items
            .iter()
            .map(stringify)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()),
        other => Err(de::Error::custom(format!("expected a list of strings, got {other}"))),
    }
}

/// Render any scalar the way a browser's `String(value)` would
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

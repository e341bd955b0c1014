//! Tolerant field deserializers for the two JSON dialects the gateway reads:
//! the upstream's PascalCase payloads and the web client's loosely typed
//! form data.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

/// Accept `"10"` or `10`, yielding `"10"`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Integer(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}

/// Accept `1990` or `"1990"`, yielding `1990`.
pub fn integer_or_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Integer(n) => i32::try_from(n).map_err(serde::de::Error::custom),
        StringOrNumber::String(s) => s.trim().parse::<i32>().map_err(serde::de::Error::custom),
        StringOrNumber::Float(n) => Err(serde::de::Error::custom(format!(
            "expected an integer, got {n}"
        ))),
    }
}

/// Accept a JSON string as-is; any other JSON value is kept as its compact
/// JSON text.
pub fn text_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

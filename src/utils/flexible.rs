//! Defensive deserializers for loosely-typed payload fields.
//!
//! Listing payloads arrive from several client revisions: nested objects
//! may be sent either as structured JSON or as a JSON-encoded string, and
//! numeric fields may be sent as numbers or as numeric strings. These
//! helpers accept both shapes so one request type serves every client.

use serde::de::{DeserializeOwned, Deserializer, Error as DeError};
use serde::Deserialize;
use serde_json::Value;

/// Deserializes `Option<T>` from either a structured value or a
/// JSON-encoded string containing one.
///
/// `null` and absent fields yield `None`. An empty string also yields
/// `None` (multipart forms send absent optional fields as `""`).
pub fn opt_string_or_value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => serde_json::from_str(&s)
            .map(Some)
            .map_err(|e| DeError::custom(format!("invalid JSON-encoded field: {}", e))),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(|e| DeError::custom(format!("invalid field value: {}", e))),
    }
}

/// Deserializes an `i64` from either a JSON number or a numeric string.
pub fn i64_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| DeError::custom("expected an integer")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| DeError::custom(format!("invalid integer string: {}", e))),
        other => Err(DeError::custom(format!(
            "expected number or numeric string, got {}",
            other
        ))),
    }
}

/// Deserializes an `f64` from either a JSON number or a numeric string.
pub fn f64_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DeError::custom("expected a number")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| DeError::custom(format!("invalid numeric string: {}", e))),
        other => Err(DeError::custom(format!(
            "expected number or numeric string, got {}",
            other
        ))),
    }
}

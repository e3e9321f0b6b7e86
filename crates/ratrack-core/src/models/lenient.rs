//! Tolerant number/string coercion for data written by other clients.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A finite number from a JSON number or a numeric string (surrounding
/// whitespace allowed). Anything else is `None`.
pub fn as_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// A non-empty display string from a JSON string, number, or bool.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `deserialize_with` helper: number or numeric string into `f64`.
pub fn f64_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_f64(&value).ok_or_else(|| serde::de::Error::custom(format!("expected a number, got {value}")))
}

/// `deserialize_with` helper: string, number, or bool rendered as text;
/// null becomes an empty string.
pub fn text_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        other => as_text(&other)
            .ok_or_else(|| serde::de::Error::custom(format!("expected text, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings_coerce() {
        assert_eq!(as_f64(&json!(12.5)), Some(12.5));
        assert_eq!(as_f64(&json!("  7 ")), Some(7.0));
        assert_eq!(as_f64(&json!("abc")), None);
        assert_eq!(as_f64(&json!(null)), None);
        assert_eq!(as_f64(&json!(true)), None);
        assert_eq!(as_f64(&json!("NaN")), None);
    }
}

//! `deserialize_with` helpers that never reject a well-formed JSON value.
//!
//! Model output drifts from the requested shape (`null`, `"8"`, `8.0`, an
//! object where a string was asked for). Each helper maps whatever arrived to
//! the closest value of the target type and falls back to the default.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, other scalars are stringified, `null` is empty, and
/// arrays/objects become their compact JSON text.
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(value_to_text(Value::deserialize(d)?))
}

/// Non-negative integers, integral floats, and numeric strings; anything else is 0.
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(value_to_count(&Value::deserialize(d)?))
}

/// Arrays of anything (elements as [`text`]), a lone string as a one-item list,
/// everything else empty.
pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items.into_iter().map(value_to_text).collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

/// A nested record, or its default when the value is not an object.
pub fn record<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(value_to_record(Value::deserialize(d)?))
}

/// A list of nested records; non-object elements become defaults.
pub fn record_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items.into_iter().map(value_to_record).collect(),
        _ => Vec::new(),
    })
}

pub fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

pub fn value_to_count(value: &Value) -> u32 {
    let as_float = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match as_float {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => f as u32,
        _ => 0,
    }
}

pub fn value_to_record<T: DeserializeOwned + Default>(value: Value) -> T {
    match value {
        Value::Object(_) => T::deserialize(value).unwrap_or_default(),
        _ => T::default(),
    }
}

//! Accessors over element records.
//!
//! Elements travel through the translator as `serde_json::Value` trees; these
//! helpers keep the path walking and number coercion in one place.

use serde_json::{Map, Value};

use crate::error::TranslateError;

/// Follows `keys` through nested mappings.
#[must_use]
pub fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |node, key| node.get(*key))
}

/// Numeric value at `keys`, accepting numeric strings as exported by Archicad properties.
#[must_use]
pub fn number(value: &Value, keys: &[&str]) -> Option<f64> {
    path(value, keys).and_then(as_number)
}

#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Like [`number`], but a missing value is a malformed record.
pub fn require_number(value: &Value, keys: &[&str]) -> Result<f64, TranslateError> {
    number(value, keys).ok_or_else(|| TranslateError::MalformedRecord {
        element: label(value),
        field: keys.join("."),
    })
}

/// Non-empty string at `keys`.
#[must_use]
pub fn text<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    path(value, keys)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Integer at `keys`; whole floats are accepted since exports are not consistent.
#[must_use]
pub fn integer(value: &Value, keys: &[&str]) -> Option<i64> {
    let node = path(value, keys)?;
    node.as_i64().or_else(|| {
        node.as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}

/// `true` when the key is present and not null.
#[must_use]
pub fn is_set(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(|v| !v.is_null())
}

/// Short human label used in log lines and errors.
#[must_use]
pub fn label(value: &Value) -> String {
    let kind = text(value, &["elementType"])
        .or_else(|| text(value, &["speckle_type"]))
        .unwrap_or("element");
    let id = text(value, &["applicationId"])
        .or_else(|| text(value, &["id"]))
        .unwrap_or("?");
    format!("{kind} {id}")
}

/// Formats a float the way the target tool shows type names: whole numbers keep one decimal.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.1}")
    } else {
        format!("{n}")
    }
}

/// Renders a scalar for use inside a type label.
#[must_use]
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), format_number),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Inserts `key` into an object record; non-object values are left untouched.
pub fn set(record: &mut Value, key: &str, value: Value) {
    if let Some(map) = record.as_object_mut() {
        map.insert(key.to_string(), value);
    }
}

/// Mutable mapping at `key`, created (or replaced, if it holds a scalar) on demand.
pub fn child_map<'a>(record: &'a mut Value, key: &str) -> Option<&'a mut Map<String, Value>> {
    let map = record.as_object_mut()?;
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut()
}

/// Name of the JSON type of `value`, for mismatch reports.
#[must_use]
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

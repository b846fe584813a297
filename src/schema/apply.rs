//! Schema override engine.
//!
//! Stamps a target-schema template onto a source record: every scalar leaf of
//! the template is written into the record, taken from the override set when
//! it supplies that key and from the template default otherwise. Mapping
//! nodes are recursed into, creating them on the record when absent. Keys the
//! template does not name are left as they are.

use serde_json::{Map, Value};

use crate::error::TranslateError;
use crate::model::record::kind;

/// Applies `template` with `overrides` to `record` in place.
///
/// `overrides` may be `Value::Null` for "no overrides". Sequences in the
/// template are leaves and are replaced as a whole.
///
/// # Errors
///
/// Returns [`TranslateError::SchemaMismatch`] when the record, template or
/// override set is not a mapping where one is required.
pub fn apply(record: &mut Value, template: &Value, overrides: &Value) -> Result<(), TranslateError> {
    let template = expect_map(template, "", "template")?;
    let overrides = nested_overrides(overrides, "")?;
    let found = kind(record);
    let record = record
        .as_object_mut()
        .ok_or(TranslateError::SchemaMismatch {
            path: String::new(),
            expected: "mapping record",
            found,
        })?;
    apply_node(record, template, overrides, "")
}

fn apply_node(
    record: &mut Map<String, Value>,
    template: &Map<String, Value>,
    overrides: Option<&Map<String, Value>>,
    path: &str,
) -> Result<(), TranslateError> {
    for (key, default) in template {
        let key_path = join(path, key);
        let supplied = overrides.and_then(|o| o.get(key));

        match default {
            Value::Object(nested) => {
                let nested_overrides = match supplied {
                    Some(value) => nested_overrides(value, &key_path)?,
                    None => None,
                };
                let slot = record
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                // target shape wins over whatever scalar the source carried here
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(child) = slot {
                    apply_node(child, nested, nested_overrides, &key_path)?;
                }
            }
            leaf => {
                let value = supplied.unwrap_or(leaf).clone();
                record.insert(key.clone(), value);
            }
        }
    }
    Ok(())
}

fn nested_overrides<'a>(
    value: &'a Value,
    path: &str,
) -> Result<Option<&'a Map<String, Value>>, TranslateError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(TranslateError::SchemaMismatch {
            path: path.to_string(),
            expected: "mapping override",
            found: kind(other),
        }),
    }
}

fn expect_map<'a>(
    value: &'a Value,
    path: &str,
    what: &'static str,
) -> Result<&'a Map<String, Value>, TranslateError> {
    value.as_object().ok_or_else(|| TranslateError::SchemaMismatch {
        path: path.to_string(),
        expected: what,
        found: kind(value),
    })
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

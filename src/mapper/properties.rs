use serde_json::{Map, Value};

use crate::error::TranslateError;
use crate::locale::{Group, Locale, Prop};
use crate::model::record;

/// Localized lookups into an element's `elementProperties`.
///
/// Missing groups and properties are logged and read as absent; they never
/// fail a mapping.
#[derive(Debug, Clone)]
pub struct PropertyReader<'a> {
    properties: Option<&'a Map<String, Value>>,
    locale: Locale,
    label: String,
}

impl<'a> PropertyReader<'a> {
    #[must_use]
    pub fn new(element: &'a Value, locale: Locale) -> Self {
        let label = record::label(element);
        let properties = element.get("elementProperties").and_then(Value::as_object);
        if properties.is_none() {
            tracing::warn!(element = %label, "no element properties found");
        }
        Self {
            properties,
            locale,
            label,
        }
    }

    #[must_use]
    pub fn group(&self, group: Group) -> Option<&'a Map<String, Value>> {
        let properties = self.properties?;
        let name = group.label(self.locale);
        let found = properties.get(name).and_then(Value::as_object);
        if found.is_none() {
            tracing::warn!(element = %self.label, group = name, "property group not found");
        }
        found
    }

    /// Raw property value; `null` values count as missing.
    #[must_use]
    pub fn value(&self, group: Group, prop: Prop) -> Option<&'a Value> {
        let values = self.group(group)?;
        let found = values
            .get(prop.label(self.locale))
            .filter(|v| !v.is_null());
        if found.is_none() {
            let err = TranslateError::MissingProperty {
                group: group.label(self.locale).to_string(),
                property: prop.label(self.locale).to_string(),
            };
            tracing::warn!(element = %self.label, "{err}");
        }
        found
    }

    /// Property value as a parameter value, `null` when missing.
    #[must_use]
    pub fn value_or_null(&self, group: Group, prop: Prop) -> Value {
        self.value(group, prop).cloned().unwrap_or(Value::Null)
    }

    /// Numeric property, `0` when missing or not numeric.
    #[must_use]
    pub fn number_or_zero(&self, group: Group, prop: Prop) -> f64 {
        self.value(group, prop)
            .and_then(record::as_number)
            .unwrap_or(0.0)
    }

    /// Property rendered as text, empty when missing.
    #[must_use]
    pub fn text_or_empty(&self, group: Group, prop: Prop) -> String {
        self.value(group, prop)
            .map(record::display)
            .unwrap_or_default()
    }
}

use serde_json::{Map, Value};

use crate::error::TranslateError;
use crate::model::record::kind;

pub const SOURCE_TOOL: &str = "archicad";
pub const TARGET_TOOL: &str = "revit";

const BUNDLED: &str = include_str!("../../schemas/remap_archicad2revit.json");

/// The remapping schema document, keyed by tool name and then by category.
///
/// Only the Archicad to Revit profile is supported. Template nodes are handed
/// out as clones, so mappers can compose them without touching the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    source: Map<String, Value>,
    target: Map<String, Value>,
}

impl SchemaDocument {
    /// Validates a parsed schema document.
    pub fn from_value(document: Value) -> Result<Self, TranslateError> {
        let source = tool_section(&document, SOURCE_TOOL)?;
        let target = tool_section(&document, TARGET_TOOL)?;
        for (node, template) in &target {
            if !template.is_object() {
                return Err(TranslateError::SchemaMismatch {
                    path: format!("{TARGET_TOOL}.{node}"),
                    expected: "mapping template",
                    found: kind(template),
                });
            }
        }
        Ok(Self { source, target })
    }

    /// The schema document compiled into the crate.
    pub fn bundled() -> Result<Self, TranslateError> {
        let document: Value =
            serde_json::from_str(BUNDLED).map_err(|e| TranslateError::SchemaMismatch {
                path: format!("bundled schema ({e})"),
                expected: "JSON document",
                found: "invalid JSON",
            })?;
        Self::from_value(document)
    }

    /// A fresh copy of the target template `node`.
    pub fn template(&self, node: &str) -> Result<Value, TranslateError> {
        self.target
            .get(node)
            .cloned()
            .ok_or_else(|| TranslateError::MissingTemplate {
                node: node.to_string(),
            })
    }

    /// A fresh copy of `node` with its `key` template replaced by the `nested` node.
    pub fn composed(&self, node: &str, key: &str, nested: &str) -> Result<Value, TranslateError> {
        let mut template = self.template(node)?;
        let nested = self.template(nested)?;
        if let Some(map) = template.as_object_mut() {
            map.insert(key.to_string(), nested);
        }
        Ok(template)
    }

    /// Category names declared on the source side.
    pub fn source_categories(&self) -> impl Iterator<Item = &str> {
        self.source.keys().map(String::as_str)
    }
}

fn tool_section(document: &Value, tool: &str) -> Result<Map<String, Value>, TranslateError> {
    match document.get(tool) {
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(TranslateError::SchemaMismatch {
            path: tool.to_string(),
            expected: "mapping",
            found: kind(other),
        }),
        None => Err(TranslateError::MissingTemplate {
            node: tool.to_string(),
        }),
    }
}

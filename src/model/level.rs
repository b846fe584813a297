use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A building story as reported by the authoring tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub index: i64,
    /// Elevation in metres.
    pub elevation: f64,
}

/// A resolved target level together with its schema-shaped record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub id: Option<String>,
    pub index: i64,
    pub name: String,
    pub elevation: f64,
    #[serde(skip)]
    pub record: Value,
}

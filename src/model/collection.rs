use serde_json::{json, Value};

pub const COLLECTION_TYPE: &str = "Speckle.Core.Models.Collection";

/// Builds an empty-shell collection record holding `elements`.
#[must_use]
pub fn new_collection(name: &str, collection_type: &str, elements: Vec<Value>) -> Value {
    json!({
        "name": name,
        "collectionType": collection_type,
        "elements": elements,
        "speckle_type": COLLECTION_TYPE,
    })
}

#[must_use]
pub fn collection_name(collection: &Value) -> Option<&str> {
    collection.get("name").and_then(Value::as_str)
}

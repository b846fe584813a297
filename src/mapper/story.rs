use serde_json::Value;

use crate::model::record::{self, format_number};
use crate::model::StoryDescriptor;

/// Builds a target level record from a story descriptor and the `level` template.
///
/// Unnamed stories are called `"{index} level on {elevation in mm}"`.
#[must_use]
pub fn map_story(story: &StoryDescriptor, template: &Value) -> Value {
    let mut level = template.clone();
    if !level.is_object() {
        level = Value::Object(serde_json::Map::new());
    }

    let name = story
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(
            || {
                format!(
                    "{} level on {}",
                    story.index,
                    format_number(story.elevation * 1000.0)
                )
            },
            str::to_string,
        );

    record::set(
        &mut level,
        "id",
        story.id.clone().map_or(Value::Null, Value::from),
    );
    record::set(&mut level, "name", Value::from(name));
    record::set(&mut level, "index", Value::from(story.index));
    record::set(&mut level, "elevation", Value::from(story.elevation));
    level
}

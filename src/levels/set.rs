use serde_json::Value;
use std::collections::HashSet;

use crate::error::TranslateError;
use crate::mapper::story::map_story;
use crate::model::{new_collection, Level, StoryDescriptor};

pub const LEVELS_COLLECTION: &str = "Levels";
pub const LEVELS_COLLECTION_TYPE: &str = "Levels Type";

/// Levels discovered for one run, ordered by index.
///
/// Built once before any element is mapped and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    /// Maps every story onto the target `level` template.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::DuplicateLevel`] when two stories share an index.
    pub fn build(stories: &[StoryDescriptor], template: &Value) -> Result<Self, TranslateError> {
        let mut seen = HashSet::new();
        let mut levels = Vec::with_capacity(stories.len());

        for story in stories {
            if !seen.insert(story.index) {
                return Err(TranslateError::DuplicateLevel { index: story.index });
            }
            let record = map_story(story, template);
            let name = record
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            levels.push(Level {
                id: story.id.clone(),
                index: story.index,
                name,
                elevation: story.elevation,
                record,
            });
        }

        levels.sort_by_key(|l| l.index);
        Ok(Self { levels })
    }

    #[must_use]
    pub fn by_index(&self, index: i64) -> Option<&Level> {
        self.levels
            .binary_search_by_key(&index, |l| l.index)
            .ok()
            .map(|i| &self.levels[i])
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Level> {
        let name = name.trim();
        self.levels.iter().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The `Levels` collection published alongside the translated graph.
    #[must_use]
    pub fn collection(&self) -> Value {
        new_collection(
            LEVELS_COLLECTION,
            LEVELS_COLLECTION_TYPE,
            self.levels.iter().map(|l| l.record.clone()).collect(),
        )
    }
}

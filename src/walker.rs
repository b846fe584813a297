//! Collection walker.
//!
//! Drives one translation pass over a retrieved object graph: publishes the
//! resolved levels, maps every element of every allowed category collection
//! in place and gathers synthesized room boundary lines into their own
//! collection.

use serde::Serialize;
use serde_json::Value;

use crate::config::TranslatorConfig;
use crate::error::TranslateError;
use crate::levels::LevelSet;
use crate::mapper::{mapper_for, MapContext};
use crate::model::collection::collection_name;
use crate::model::record;
use crate::model::{new_collection, Category, CategorySet, StoryDescriptor};
use crate::schema::SchemaDocument;

/// Graph root key holding the `Levels` collection.
pub const LEVELS_KEY: &str = "@levels";
pub const BOUNDARIES_COLLECTION: &str = "Room Separation Lines";
pub const BOUNDARIES_COLLECTION_TYPE: &str = "Revit Category";

/// Element counts for one category collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub mapped: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcome of one translation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    pub collections: Vec<CategoryStats>,
    pub levels: usize,
    pub boundaries: usize,
}

impl TranslationReport {
    #[must_use]
    pub fn mapped(&self) -> usize {
        self.collections.iter().map(|c| c.mapped).sum()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.collections.iter().map(|c| c.skipped).sum()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.collections.iter().map(|c| c.failed).sum()
    }
}

/// Everything one run needs, resolved before the first element is touched.
#[derive(Debug, Clone)]
pub struct Translator {
    schema: SchemaDocument,
    levels: LevelSet,
    config: TranslatorConfig,
    categories: CategorySet,
}

impl Translator {
    /// Resolves the category allow-list and builds the level set.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::UnmappedCategory`] for an unknown name in an
    /// explicit allow-list, [`TranslateError::MissingTemplate`] when the schema
    /// has no `level` template and [`TranslateError::DuplicateLevel`] for
    /// stories sharing an index.
    pub fn new(
        schema: SchemaDocument,
        stories: &[StoryDescriptor],
        config: TranslatorConfig,
    ) -> Result<Self, TranslateError> {
        let categories = match &config.categories {
            Some(names) => CategorySet::from_names(names.as_slice())?,
            None => CategorySet::from_known(schema.source_categories()),
        };
        let levels = LevelSet::build(stories, &schema.template("level")?)?;
        tracing::debug!(
            levels = levels.len(),
            categories = ?categories.iter().collect::<Vec<_>>(),
            "translator ready"
        );
        Ok(Self {
            schema,
            levels,
            config,
            categories,
        })
    }

    #[must_use]
    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    #[must_use]
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    fn context(&self) -> MapContext<'_> {
        MapContext {
            schema: &self.schema,
            levels: &self.levels,
            config: &self.config,
            categories: &self.categories,
        }
    }

    /// Translates `graph` in place.
    ///
    /// Collections of unknown or disallowed categories are left untouched and
    /// counted as skipped. An element that fails to map is kept as it was and
    /// counted as failed; a strict run stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::MalformedRecord`] when the root has no
    /// `elements` sequence, and in strict mode the first element failure. A
    /// strict run that fails leaves the graph partially translated.
    pub fn translate(&self, graph: &mut Value) -> Result<TranslationReport, TranslateError> {
        let mut collections = match graph.get_mut("elements").map(Value::take) {
            Some(Value::Array(collections)) => collections,
            other => {
                if let Some(other) = other {
                    record::set(graph, "elements", other);
                }
                return Err(TranslateError::MalformedRecord {
                    element: "graph root".to_string(),
                    field: "elements".to_string(),
                });
            }
        };

        record::set(graph, LEVELS_KEY, self.levels.collection());

        let ctx = self.context();
        let mut report = TranslationReport {
            levels: self.levels.len(),
            ..TranslationReport::default()
        };
        let mut boundaries = Vec::new();
        let mut outcome = Ok(());

        for collection in &mut collections {
            let name = collection_name(collection).unwrap_or_default().to_string();
            if name == BOUNDARIES_COLLECTION {
                continue;
            }
            match self.translate_collection(collection, &name, &ctx, &mut boundaries) {
                Ok(stats) => report.collections.push(stats),
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }

        report.boundaries = boundaries.len();
        append_boundaries(&mut collections, boundaries);
        record::set(graph, "elements", Value::Array(collections));
        outcome?;

        tracing::info!(
            mapped = report.mapped(),
            skipped = report.skipped(),
            failed = report.failed(),
            boundaries = report.boundaries,
            "translation finished"
        );
        Ok(report)
    }

    fn translate_collection(
        &self,
        collection: &mut Value,
        name: &str,
        ctx: &MapContext<'_>,
        boundaries: &mut Vec<Value>,
    ) -> Result<CategoryStats, TranslateError> {
        let mut stats = CategoryStats {
            category: name.to_string(),
            ..CategoryStats::default()
        };
        let element_count = collection
            .get("elements")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);

        let Some(category) = Category::parse(name) else {
            let err = TranslateError::UnmappedCategory {
                name: name.to_string(),
            };
            tracing::warn!(elements = element_count, "{err}, collection skipped");
            stats.skipped = element_count;
            return Ok(stats);
        };
        if !self.categories.contains(category) {
            tracing::info!(collection = name, "category not in allow-list, collection skipped");
            stats.skipped = element_count;
            return Ok(stats);
        }

        let elements = match collection.get_mut("elements").map(Value::take) {
            Some(Value::Array(elements)) => elements,
            other => {
                tracing::warn!(collection = name, "collection has no element sequence");
                if let Some(other) = other {
                    record::set(collection, "elements", other);
                }
                return Ok(stats);
            }
        };

        let map = mapper_for(category);
        let mut mapped = Vec::with_capacity(elements.len());
        let mut failure = None;

        for element in elements {
            if failure.is_some() {
                mapped.push(element);
                continue;
            }
            let original = element.clone();
            match map(element, ctx, None) {
                Ok(mut result) => {
                    stats.mapped += 1;
                    boundaries.append(&mut result.synthesized);
                    mapped.push(result.element);
                }
                Err(err) => {
                    tracing::error!(collection = name, element = %record::label(&original), "{err}");
                    stats.failed += 1;
                    mapped.push(original);
                    if self.config.strict {
                        failure = Some(err);
                    }
                }
            }
        }

        record::set(collection, "elements", Value::Array(mapped));
        tracing::debug!(
            collection = name,
            mapped = stats.mapped,
            failed = stats.failed,
            "collection translated"
        );
        match failure {
            Some(err) => Err(err),
            None => Ok(stats),
        }
    }
}

/// Adds `boundaries` to the existing boundary collection, or appends a new one.
fn append_boundaries(collections: &mut Vec<Value>, mut boundaries: Vec<Value>) {
    let existing = collections
        .iter_mut()
        .find(|c| collection_name(c) == Some(BOUNDARIES_COLLECTION))
        .and_then(|c| c.get_mut("elements"))
        .and_then(Value::as_array_mut);
    match existing {
        Some(elements) => elements.append(&mut boundaries),
        None => collections.push(new_collection(
            BOUNDARIES_COLLECTION,
            BOUNDARIES_COLLECTION_TYPE,
            boundaries,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::collection::COLLECTION_TYPE;
    use serde_json::json;

    fn stories() -> Vec<StoryDescriptor> {
        vec![
            StoryDescriptor {
                id: Some("s0".to_string()),
                name: Some("Ground".to_string()),
                index: 0,
                elevation: 0.0,
            },
            StoryDescriptor {
                id: Some("s1".to_string()),
                name: None,
                index: 1,
                elevation: 3.0,
            },
        ]
    }

    fn translator(config: TranslatorConfig) -> Translator {
        Translator::new(SchemaDocument::bundled().unwrap(), &stories(), config).unwrap()
    }

    fn slab(thickness: f64) -> Value {
        json!({
            "id": format!("slab-{thickness}"),
            "elementType": "Slab",
            "structure": "Basic",
            "buildingMaterialName": "Concrete",
            "thickness": thickness,
            "level": {"name": "Ground", "index": 0}
        })
    }

    fn graph(collections: Vec<Value>) -> Value {
        json!({"id": "root", "speckle_type": "Base", "elements": collections})
    }

    #[test]
    fn levels_are_published_before_mapping() {
        let mut root = graph(vec![]);
        let report = translator(TranslatorConfig::default())
            .translate(&mut root)
            .unwrap();

        assert_eq!(report.levels, 2);
        let levels = &root[LEVELS_KEY];
        assert_eq!(levels["name"], "Levels");
        assert_eq!(levels["collectionType"], "Levels Type");
        assert_eq!(levels["elements"][1]["name"], "1 level on 3000.0");
        assert_eq!(levels["elements"][0]["speckle_type"], "Objects.BuiltElements.Revit.RevitLevel");
    }

    #[test]
    fn boundary_collection_is_always_appended() {
        let mut root = graph(vec![new_collection("Slab", "Archicad", vec![slab(0.2)])]);
        translator(TranslatorConfig::default())
            .translate(&mut root)
            .unwrap();

        let collections = root["elements"].as_array().unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[1]["name"], BOUNDARIES_COLLECTION);
        assert_eq!(collections[1]["collectionType"], BOUNDARIES_COLLECTION_TYPE);
        assert_eq!(collections[1]["speckle_type"], COLLECTION_TYPE);
        assert_eq!(collections[0]["elements"][0]["type"], "Concrete (0.2)");
    }

    #[test]
    fn unmapped_and_disallowed_collections_are_skipped() {
        let railing = json!({"id": "r1", "elementType": "Railing"});
        let mut root = graph(vec![
            new_collection("Railing", "Archicad", vec![railing.clone()]),
            new_collection("Slab", "Archicad", vec![slab(0.2)]),
        ]);
        let config = TranslatorConfig {
            categories: Some(vec!["wall".to_string()]),
            ..TranslatorConfig::default()
        };
        let report = translator(config).translate(&mut root).unwrap();

        assert_eq!(report.skipped(), 2);
        assert_eq!(report.mapped(), 0);
        assert_eq!(root["elements"][0]["elements"][0], railing);
        assert_eq!(root["elements"][1]["elements"][0], slab(0.2));
    }

    #[test]
    fn failed_elements_are_kept_in_lenient_mode() {
        let mut root = graph(vec![new_collection("Slab", "Archicad", vec![slab(0.0), slab(0.3)])]);
        root["elements"][0]["elements"][0]
            .as_object_mut()
            .unwrap()
            .remove("thickness");

        let report = translator(TranslatorConfig::default())
            .translate(&mut root)
            .unwrap();
        assert_eq!(
            report.collections,
            vec![CategoryStats {
                category: "Slab".to_string(),
                mapped: 1,
                skipped: 0,
                failed: 1,
            }]
        );
        assert!(root["elements"][0]["elements"][0].get("type").is_none());
        assert_eq!(root["elements"][0]["elements"][1]["type"], "Concrete (0.3)");
    }

    #[test]
    fn strict_mode_aborts_on_the_first_failure() {
        let mut broken = slab(0.3);
        broken.as_object_mut().unwrap().remove("thickness");
        let mut root = graph(vec![new_collection("Slab", "Archicad", vec![broken, slab(0.3)])]);
        let config = TranslatorConfig {
            strict: true,
            ..TranslatorConfig::default()
        };

        let err = translator(config).translate(&mut root).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedRecord { .. }));
        let elements = root["elements"][0]["elements"].as_array().unwrap();
        assert_eq!(elements.len(), 2);
        assert!(elements[1].get("type").is_none());
    }

    #[test]
    fn root_without_elements_is_rejected() {
        let mut root = json!({"id": "root"});
        let err = translator(TranslatorConfig::default())
            .translate(&mut root)
            .unwrap_err();
        assert!(matches!(err, TranslateError::MalformedRecord { ref field, .. } if field == "elements"));
    }

    #[test]
    fn unknown_allow_list_names_fail_construction() {
        let config = TranslatorConfig {
            categories: Some(vec!["stair".to_string()]),
            ..TranslatorConfig::default()
        };
        let err = Translator::new(SchemaDocument::bundled().unwrap(), &stories(), config).unwrap_err();
        assert!(matches!(err, TranslateError::UnmappedCategory { .. }));
    }

    #[test]
    fn duplicate_story_indices_fail_construction() {
        let mut stories = stories();
        stories[1].index = 0;
        let err = Translator::new(
            SchemaDocument::bundled().unwrap(),
            &stories,
            TranslatorConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, TranslateError::DuplicateLevel { index: 0 });
    }
}

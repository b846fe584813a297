use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use crate::config::TranslatorConfig;
use crate::error::LoadError;
use crate::model::StoryDescriptor;
use crate::schema::SchemaDocument;

fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, LoadError> {
    let path_ref = path.as_ref();
    let content = std::fs::read_to_string(path_ref).map_err(|source| LoadError::FileRead {
        path: path_ref.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson {
        path: path_ref.to_path_buf(),
        source,
    })
}

/// Reads a retrieved object graph.
///
/// # Errors
///
/// Returns [`LoadError::FileRead`] if the file cannot be read and
/// [`LoadError::InvalidJson`] if it is not JSON.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Value, LoadError> {
    read_json(path)
}

/// Reads story descriptors, either a bare list or a `{"stories": [...]}` document.
///
/// # Errors
///
/// Returns [`LoadError::FileRead`] or [`LoadError::InvalidJson`].
pub fn load_stories<P: AsRef<Path>>(path: P) -> Result<Vec<StoryDescriptor>, LoadError> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Stories {
        List(Vec<StoryDescriptor>),
        Document { stories: Vec<StoryDescriptor> },
    }

    Ok(match read_json(path)? {
        Stories::List(stories) | Stories::Document { stories } => stories,
    })
}

/// Reads a schema template document.
///
/// # Errors
///
/// Returns [`LoadError::InvalidSchema`] when the document lacks the source or
/// target tool section, in addition to the read and JSON errors.
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<SchemaDocument, LoadError> {
    let document: Value = read_json(path)?;
    Ok(SchemaDocument::from_value(document)?)
}

/// Reads a translator configuration; absent fields take their defaults.
///
/// # Errors
///
/// Returns [`LoadError::FileRead`] or [`LoadError::InvalidJson`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TranslatorConfig, LoadError> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use std::path::PathBuf;

    struct TempFile(PathBuf);

    impl TempFile {
        fn new(name: &str, content: &str) -> Self {
            let path = std::env::temp_dir().join(format!("a2r-{}-{name}", std::process::id()));
            std::fs::write(&path, content).unwrap();
            Self(path)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn stories_load_from_list_or_document() {
        let list = TempFile::new("stories-list.json", r#"[{"index": 0, "elevation": 0.0}]"#);
        let doc = TempFile::new(
            "stories-doc.json",
            r#"{"stories": [{"id": "a", "name": "Roof", "index": 3, "elevation": 9.0}]}"#,
        );
        assert_eq!(load_stories(&list.0).unwrap()[0].name, None);
        assert_eq!(load_stories(&doc.0).unwrap()[0].index, 3);
    }

    #[test]
    fn partial_config_takes_defaults() {
        let file = TempFile::new("config.json", r#"{"locale": "ua"}"#);
        let config = load_config(&file.0).unwrap();
        assert_eq!(config.locale, Locale::Ua);
        assert!(config.curved_unit_fix);
        assert!(!config.strict);
    }

    #[test]
    fn schema_without_target_section_is_invalid() {
        let file = TempFile::new("schema.json", r#"{"archicad": {}}"#);
        assert!(matches!(
            load_schema(&file.0),
            Err(LoadError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn missing_and_broken_files_are_reported() {
        let missing = std::env::temp_dir().join("a2r-does-not-exist.json");
        assert!(matches!(load_graph(&missing), Err(LoadError::FileRead { .. })));

        let broken = TempFile::new("broken.json", "{not json");
        assert!(matches!(
            load_graph(&broken.0),
            Err(LoadError::InvalidJson { .. })
        ));
    }
}

//! Error types for the Archicad to Revit translator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reconciling a single element or building the run context.
///
/// `MissingProperty` and `UnresolvedLevelLink` are recovered locally by the
/// mappers (logged, then defaulted); they are still modelled here so the
/// warning text and the lookup helpers share one vocabulary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    /// An override value does not fit the shape of the target template.
    #[error("schema mismatch at '{path}': expected {expected}, found {found}")]
    SchemaMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The schema document has no template node with this name.
    #[error("schema document has no template '{node}'")]
    MissingTemplate { node: String },

    /// Geometry that cannot be reconciled (coincident points, zero thickness, bad arcs).
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    /// An expected localized property group or property is absent.
    #[error("missing property '{property}' in group '{group}'")]
    MissingProperty { group: String, property: String },

    /// A category has no registered mapper.
    #[error("no mapper registered for category '{name}'")]
    UnmappedCategory { name: String },

    /// A top link story reference could not be parsed or resolved.
    #[error("unresolved level link: {reference}")]
    UnresolvedLevelLink { reference: String },

    /// A field the mapper depends on is absent or has the wrong type.
    #[error("element {element}: field '{field}' is missing or malformed")]
    MalformedRecord { element: String, field: String },

    /// Two story descriptors share a level index.
    #[error("duplicate level index {index}")]
    DuplicateLevel { index: i64 },
}

/// Errors that can occur when loading run inputs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read an input file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("invalid JSON in '{path}': {source}")]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The schema document does not have the expected layout.
    #[error("invalid schema document: {source}")]
    InvalidSchema {
        #[from]
        source: TranslateError,
    },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}

/// Errors in user supplied configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown locale '{0}' (expected one of: en, ua)")]
    UnknownLocale(String),
}

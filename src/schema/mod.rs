pub mod apply;
pub mod document;

pub use apply::apply;
pub use document::{SchemaDocument, SOURCE_TOOL, TARGET_TOOL};

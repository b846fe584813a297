//! Loading run inputs from disk.

pub mod json;

pub use crate::error::LoadError;
pub use json::{load_config, load_graph, load_schema, load_stories};

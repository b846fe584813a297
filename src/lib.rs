//! # A2R Translator
//!
//! Reconciles Archicad building elements with Revit's data model so a model
//! exchanged through a shared object store arrives in Revit as native
//! elements.
//!
//! ## Features
//!
//! - Schema override engine stamping Revit templates onto Archicad records
//! - Wall reference line to centreline reconciliation, straight and curved
//! - Top link story resolution against the project's levels
//! - Category mappers for walls, slabs, roofs, columns, beams, doors,
//!   windows, openings and zones
//! - Room separation lines synthesized from zone outlines
//! - JSON graph export and CSV translation report
//!
//! ## Example
//!
//! ```no_run
//! use a2r_translator::config::TranslatorConfig;
//! use a2r_translator::input::{load_graph, load_stories};
//! use a2r_translator::schema::SchemaDocument;
//! use a2r_translator::walker::Translator;
//!
//! let mut graph = load_graph("commit.json")?;
//! let stories = load_stories("stories.json")?;
//! let translator = Translator::new(SchemaDocument::bundled()?, &stories, TranslatorConfig::default())?;
//! let report = translator.translate(&mut graph)?;
//! println!("mapped {} elements", report.mapped());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod levels;
pub mod locale;
pub mod mapper;
pub mod model;
pub mod schema;
pub mod walker;

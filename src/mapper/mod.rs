//! Category mappers.
//!
//! Each mapper turns one Archicad-shaped element into its Revit-shaped
//! counterpart. Mappers keep no state between calls; everything they need is
//! passed in through [`MapContext`] and, for hosted elements, [`Host`].

pub mod beam;
pub mod column;
pub mod opening;
pub mod parameters;
pub mod properties;
pub mod slab;
pub mod story;
pub mod wall;
pub mod wido;
pub mod zone;

use serde_json::Value;

use crate::config::TranslatorConfig;
use crate::error::TranslateError;
use crate::geometry::WallFrame;
use crate::levels::{resolve_top_level, LevelSet};
use crate::locale::{Group, Prop};
use crate::model::record;
use crate::model::{Category, CategorySet};
use crate::schema::SchemaDocument;
use properties::PropertyReader;

/// Read-only run state shared by every mapper invocation.
#[derive(Debug, Clone, Copy)]
pub struct MapContext<'a> {
    pub schema: &'a SchemaDocument,
    pub levels: &'a LevelSet,
    pub config: &'a TranslatorConfig,
    pub categories: &'a CategorySet,
}

/// Orientation of the element hosting a door, window or opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    /// Walls.
    Vertical,
    /// Slabs and roofs.
    Horizontal,
}

/// The host of a sub-element being mapped.
#[derive(Debug, Clone, Copy)]
pub struct Host<'a> {
    pub kind: HostKind,
    pub level: &'a Value,
    pub frame: Option<WallFrame>,
}

/// Mapper output: the transformed element plus records synthesized for other collections.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped {
    pub element: Value,
    pub synthesized: Vec<Value>,
}

impl Mapped {
    #[must_use]
    pub fn element(element: Value) -> Self {
        Self {
            element,
            synthesized: Vec::new(),
        }
    }
}

pub type MapFn =
    fn(Value, &MapContext<'_>, Option<&Host<'_>>) -> Result<Mapped, TranslateError>;

/// The mapper registered for `category`.
#[must_use]
pub fn mapper_for(category: Category) -> MapFn {
    match category {
        Category::Beam => beam::map_beam,
        Category::Column => column::map_column,
        Category::Door | Category::Window => wido::map_wido,
        Category::Opening => opening::map_opening,
        Category::Roof => slab::map_roof,
        Category::Slab => slab::map_slab,
        Category::Wall => wall::map_wall,
        Category::Zone => zone::map_zone,
    }
}

/// Name of the building body: material, composite or profile depending on the structure type.
#[must_use]
pub fn structure_material(element: &Value) -> String {
    let structure = record::text(element, &["structure"]).unwrap_or_default();
    let field = match structure {
        "Basic" => "buildingMaterialName",
        "Composite" => "compositeName",
        "Profile" => "profileName",
        other => return other.to_string(),
    };
    element.get(field).map(record::display).unwrap_or_default()
}

/// Top level and top offset of an element.
///
/// An existing `topLevel` is kept. Otherwise the top link story is resolved;
/// without one the element is bounded by its own level, and its top offset
/// becomes `base offset + height`.
pub fn vertical_extent(
    element: &Value,
    ctx: &MapContext<'_>,
    props: &PropertyReader<'_>,
    base_offset_key: &str,
) -> (Value, Value) {
    let existing_offset = element.get("topOffset").cloned().unwrap_or(Value::Null);
    if record::is_set(element, "topLevel") {
        return (element["topLevel"].clone(), existing_offset);
    }

    let link = props
        .value(Group::General, Prop::TopLinkStory)
        .map(record::display)
        .unwrap_or_default();
    if let Some(level) = resolve_top_level(element, &link, ctx.levels) {
        let offset = if existing_offset.is_null() {
            Value::from(0.0)
        } else {
            existing_offset
        };
        return (level.record.clone(), offset);
    }

    let base = record::number(element, &[base_offset_key]).unwrap_or(0.0);
    let height = record::number(element, &["height"]).unwrap_or(0.0);
    let own = element.get("level").cloned().unwrap_or(Value::Null);
    (own, Value::from(base + height))
}

/// Maps the hosted `elements` of `host_element` in place.
///
/// Sub-elements outside the active allow-list, or of categories that cannot
/// be hosted, are kept unchanged with a warning. Every mapped sub-element is
/// moved onto the host's level. Errors abort the host's mapping.
pub fn map_hosted(
    host_element: &mut Value,
    ctx: &MapContext<'_>,
    kind: HostKind,
    frame: Option<WallFrame>,
) -> Result<Vec<Value>, TranslateError> {
    let Some(children) = host_element.get_mut("elements").map(Value::take) else {
        return Ok(Vec::new());
    };
    let Value::Array(children) = children else {
        record::set(host_element, "elements", children);
        return Ok(Vec::new());
    };

    let level = host_element.get("level").cloned().unwrap_or(Value::Null);
    let host = Host {
        kind,
        level: &level,
        frame,
    };
    let mut synthesized = Vec::new();
    let mut mapped = Vec::with_capacity(children.len());

    for child in children {
        let element_type = record::text(&child, &["elementType"]).unwrap_or_default();
        let category = Category::parse(element_type)
            .filter(|c| c.is_hosted() && ctx.categories.contains(*c));
        let Some(category) = category else {
            tracing::warn!(
                host = %record::label(host_element),
                category = element_type,
                "translation skipped for hosted element"
            );
            mapped.push(child);
            continue;
        };

        let mut result = mapper_for(category)(child, ctx, Some(&host))?;
        record::set(&mut result.element, "level", level.clone());
        synthesized.append(&mut result.synthesized);
        mapped.push(result.element);
    }

    record::set(host_element, "elements", Value::Array(mapped));
    Ok(synthesized)
}

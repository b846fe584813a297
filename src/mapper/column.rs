use serde_json::{json, Value};

use super::parameters::{attach, discipline, division, parameter, DISCIPLINE, DIVISION};
use super::properties::PropertyReader;
use super::{vertical_extent, Host, MapContext, Mapped};
use crate::error::TranslateError;
use crate::model::record::{self, format_number};
use crate::schema::apply;

const ASSEMBLY: [&str; 3] = ["segments", "Segment #1", "assemblySegmentData"];

/// Revit `(y, z)` justification codes for an Archicad anchor point.
///
/// Anchor points number the cross-section grid row by row from the top left;
/// Revit codes are 0 left/top, 1 centre, 3 right/bottom.
#[must_use]
pub fn justification(anchor: i64) -> Option<(i64, i64)> {
    const TABLE: [(i64, i64); 9] = [
        (0, 0),
        (1, 0),
        (3, 0),
        (0, 1),
        (1, 1),
        (3, 1),
        (0, 3),
        (1, 3),
        (3, 3),
    ];
    usize::try_from(anchor)
        .ok()
        .and_then(|i| TABLE.get(i))
        .copied()
}

/// Looks up the justification codes of `element`'s `anchorPoint`.
///
/// # Errors
///
/// Returns [`TranslateError::MalformedRecord`] for codes outside 0..=8.
pub(super) fn anchor_justification(element: &Value) -> Result<Option<(i64, i64)>, TranslateError> {
    let Some(anchor) = element.get("anchorPoint").filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    anchor
        .as_i64()
        .and_then(justification)
        .map(Some)
        .ok_or_else(|| TranslateError::MalformedRecord {
            element: record::label(element),
            field: "anchorPoint".to_string(),
        })
}

pub(super) fn assembly_path(field: &str) -> [&str; 4] {
    [ASSEMBLY[0], ASSEMBLY[1], ASSEMBLY[2], field]
}

fn assembly_field(element: &Value, field: &str) -> Option<Value> {
    record::path(element, &assembly_path(field)).cloned()
}

fn millimetres(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn map_column(
    element: Value,
    ctx: &MapContext<'_>,
    _host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    let mut column = element;
    let props = PropertyReader::new(&column, ctx.config.locale);
    let division = division(&props);
    let discipline = discipline(&props);
    let (top_level, top_offset) = vertical_extent(&column, ctx, &props, "bottomOffset");

    let width = millimetres(record::require_number(&column, &assembly_path("nominalWidth"))?);
    let height = millimetres(record::require_number(&column, &assembly_path("nominalHeight"))?);

    let structure = assembly_field(&column, "modelElemStructureType");
    let body = if structure.as_ref().and_then(Value::as_str) == Some("Complex Profile") {
        assembly_field(&column, "profileAttrName")
    } else {
        assembly_field(&column, "buildingMaterial")
    };
    let body = body.as_ref().map(record::display).unwrap_or_default();
    let column_height = column.get("height").map(record::display).unwrap_or_default();

    let overrides = json!({
        "type": format!(
            "{body} {}x{} H: {column_height}",
            format_number(height),
            format_number(width)
        ),
        "topLevel": top_level,
        "rotation": column.get("slantDirectionAngle").cloned().unwrap_or(Value::Null),
        "baseOffset": column.get("bottomOffset").cloned().unwrap_or(Value::Null),
        "topOffset": top_offset,
    });
    let justified = anchor_justification(&column)?;

    let template = ctx.schema.template("column")?;
    apply(&mut column, &template, &overrides)?;

    if let Some((jy, jz)) = justified {
        attach(&mut column, "Y_JUSTIFICATION", parameter("Y_JUSTIFICATION", json!(jy)));
        attach(&mut column, "Z_JUSTIFICATION", parameter("Z_JUSTIFICATION", json!(jz)));
    }
    attach(&mut column, DIVISION, division);
    attach(&mut column, DISCIPLINE, discipline);
    Ok(Mapped::element(column))
}

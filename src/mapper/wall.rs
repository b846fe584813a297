//! Wall mapper.
//!
//! Revit places walls by their centreline and a location line code, Archicad
//! by the reference line the user drew. The exchanged baseline is therefore
//! moved onto the centreline: straight walls are offset perpendicular to their
//! axis, curved walls are rebuilt as a three point arc.

use serde_json::{json, Value};

use super::parameters::{attach, division, DIVISION};
use super::properties::PropertyReader;
use super::{map_hosted, structure_material, vertical_extent, Host, HostKind, MapContext, Mapped};
use crate::error::TranslateError;
use crate::geometry::{
    curved_centerline, direction, straight_centerline, Line, Point3, ReferenceLine, WallFrame,
};
use crate::model::record::{self, format_number};
use crate::schema::apply;

pub fn map_wall(
    element: Value,
    ctx: &MapContext<'_>,
    _host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    let mut wall = element;
    let props = PropertyReader::new(&wall, ctx.config.locale);
    let division = division(&props);
    let (top_level, top_offset) = vertical_extent(&wall, ctx, &props, "baseOffset");

    let location = record::text(&wall, &["referenceLineLocation"])
        .and_then(ReferenceLine::parse)
        .ok_or_else(|| TranslateError::MalformedRecord {
            element: record::label(&wall),
            field: "referenceLineLocation".to_string(),
        })?;
    let thickness = record::require_number(&wall, &["thickness"])?;
    let start = Point3::from_record(&wall, &["baseLine", "start"])?;
    let end = Point3::from_record(&wall, &["baseLine", "end"])?;
    let reference = Line::new(start, end);

    let mut overrides = json!({
        "type": type_label(&wall, thickness),
        "topLevel": top_level,
        "topOffset": top_offset,
        "parameters": {
            "WALL_KEY_REF_PARAM": {"value": location.revit_code()}
        }
    });

    // null and zero arc angles both describe straight walls
    let arc_angle = record::number(&wall, &["arcAngle"]).filter(|a| *a != 0.0);
    let template = match arc_angle {
        None => {
            let offset = record::number(&wall, &["offsetFromOutside"]).unwrap_or(0.0);
            let flipped = wall.get("flipped").and_then(Value::as_bool).unwrap_or(false);
            let centre = straight_centerline(reference, thickness, offset, flipped)?;
            record::set(
                &mut overrides,
                "baseLine",
                json!({
                    "start": {"x": centre.start.x, "y": centre.start.y},
                    "end": {"x": centre.end.x, "y": centre.end.y}
                }),
            );
            ctx.schema.composed("wall", "baseLine", "wall_base")?
        }
        Some(angle) => {
            let chord = record::require_number(&wall, &["baseLine", "length"])?;
            let arc = curved_centerline(reference, chord, angle, thickness, location)?;
            record::set(&mut overrides, "baseLine", arc.to_override("m"));
            ctx.schema.composed("wall", "baseLine", "wall_base_curved")?
        }
    };

    apply(&mut wall, &template, &overrides)?;

    // hosted doors and windows are placed along the authored reference line
    let frame = WallFrame {
        origin: start,
        direction: direction(start, end)?,
    };
    let synthesized = map_hosted(&mut wall, ctx, HostKind::Vertical, Some(frame))?;

    attach(&mut wall, DIVISION, division);
    Ok(Mapped {
        element: wall,
        synthesized,
    })
}

fn type_label(wall: &Value, thickness: f64) -> String {
    let material = structure_material(wall);
    let label = format!("{material} ({})", format_number(thickness));
    match wall.get("layer").map(record::display) {
        Some(layer) if !layer.is_empty() => format!("{label} - {layer}"),
        _ => label,
    }
}

//! Slab and roof mappers.
//!
//! Both are horizontal, outline-based elements; they differ only in the
//! template they are stamped with and in which home story elevation drives
//! the level offset.

use serde_json::{json, Value};

use super::parameters::{attach, division, DIVISION};
use super::properties::PropertyReader;
use super::{map_hosted, structure_material, Host, HostKind, MapContext, Mapped};
use crate::error::TranslateError;
use crate::geometry::outline::{curved_segment_millimetres, is_curved_segment};
use crate::locale::{Group, Prop};
use crate::model::record::{self, format_number};
use crate::schema::apply;

struct Horizontal {
    template: &'static str,
    elevation: Prop,
    offset_param: &'static str,
}

const FLOOR: Horizontal = Horizontal {
    template: "floor",
    elevation: Prop::TopElevationHomeStory,
    offset_param: "FLOOR_HEIGHTABOVELEVEL_PARAM",
};

const ROOF: Horizontal = Horizontal {
    template: "roof",
    elevation: Prop::BottomElevationHomeStory,
    offset_param: "ROOF_LEVEL_OFFSET_PARAM",
};

pub fn map_slab(
    element: Value,
    ctx: &MapContext<'_>,
    _host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    map_horizontal(element, ctx, &FLOOR)
}

pub fn map_roof(
    element: Value,
    ctx: &MapContext<'_>,
    _host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    map_horizontal(element, ctx, &ROOF)
}

fn map_horizontal(
    element: Value,
    ctx: &MapContext<'_>,
    kind: &Horizontal,
) -> Result<Mapped, TranslateError> {
    let mut slab = element;
    let props = PropertyReader::new(&slab, ctx.config.locale);
    let division = division(&props);
    let offset = props.number_or_zero(Group::General, kind.elevation);

    let thickness = record::require_number(&slab, &["thickness"])?;
    let overrides = json!({
        "type": format!("{} ({})", structure_material(&slab), format_number(thickness)),
        "TopElevationToHomeStory": offset,
        "parameters": {
            kind.offset_param: {"value": offset}
        }
    });

    if ctx.config.curved_unit_fix {
        restate_curved_segments(&mut slab, ctx)?;
    }

    let template = ctx.schema.template(kind.template)?;
    apply(&mut slab, &template, &overrides)?;

    let synthesized = map_hosted(&mut slab, ctx, HostKind::Horizontal, None)?;

    attach(&mut slab, DIVISION, division);
    Ok(Mapped {
        element: slab,
        synthesized,
    })
}

/// Stamps every arc segment of the outline with the millimetre arc template.
fn restate_curved_segments(slab: &mut Value, ctx: &MapContext<'_>) -> Result<(), TranslateError> {
    let Some(segments) = slab
        .pointer_mut("/outline/segments")
        .and_then(Value::as_array_mut)
    else {
        return Ok(());
    };
    if !segments.iter().any(is_curved_segment) {
        return Ok(());
    }

    let template = ctx.schema.template("floor_segment_curved")?;
    for segment in segments.iter_mut().filter(|s| is_curved_segment(s)) {
        let overrides = curved_segment_millimetres(segment)?;
        apply(segment, &template, &overrides)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelSet;
    use crate::mapper::testing::Fixture;
    use pretty_assertions::assert_eq;

    fn slab() -> Value {
        json!({
            "id": "s1",
            "elementType": "Slab",
            "structure": "Basic",
            "buildingMaterialName": "Concrete",
            "thickness": 0.25,
            "level": {"name": "Ground", "index": 0},
            "outline": {
                "segments": [
                    {
                        "speckle_type": "Objects.Geometry.Line",
                        "start": {"x": 0.0, "y": 0.0, "z": 0.0},
                        "end": {"x": 4.0, "y": 0.0, "z": 0.0}
                    },
                    {
                        "speckle_type": "Objects.Geometry.Arc",
                        "plane": {"origin": {"x": 2.0, "y": 2.0, "z": 0.0}},
                        "startPoint": {"x": 4.0, "y": 0.0, "z": 0.0},
                        "midPoint": {"x": 4.8, "y": 2.0, "z": 0.0},
                        "endPoint": {"x": 4.0, "y": 4.0, "z": 0.0},
                        "angleRadians": 1.5
                    }
                ]
            },
            "elementProperties": {
                "General Parameters": {
                    "Top Elevation To Home Story": 0.1,
                    "Bottom Elevation To Home Story": -0.15
                },
                "BUILDING INFORMATION": {"RLL-Building Part": "A"}
            }
        })
    }

    #[test]
    fn slab_becomes_a_floor_offset_by_its_top_elevation() {
        let fixture = Fixture::new(LevelSet::default());
        let floor = map_slab(slab(), &fixture.ctx(), None).unwrap().element;

        assert_eq!(floor["type"], "Concrete (0.25)");
        assert_eq!(floor["TopElevationToHomeStory"], 0.1);
        assert_eq!(floor["parameters"]["FLOOR_HEIGHTABOVELEVEL_PARAM"]["value"], 0.1);
        assert_eq!(floor["speckle_type"], "Objects.BuiltElements.Revit.RevitFloor");
        assert_eq!(floor["parameters"][DIVISION]["value"], "A");
        assert_eq!(floor["level"]["name"], "Ground");
    }

    #[test]
    fn roof_uses_its_bottom_elevation() {
        let fixture = Fixture::new(LevelSet::default());
        let mut source = slab();
        source["elementType"] = json!("Roof");
        let roof = map_roof(source, &fixture.ctx(), None).unwrap().element;

        assert_eq!(roof["TopElevationToHomeStory"], -0.15);
        assert_eq!(roof["parameters"]["ROOF_LEVEL_OFFSET_PARAM"]["value"], -0.15);
        assert!(roof["parameters"].get("FLOOR_HEIGHTABOVELEVEL_PARAM").is_none());
    }

    #[test]
    fn curved_outline_segments_are_restated_in_millimetres() {
        let fixture = Fixture::new(LevelSet::default());
        let floor = map_slab(slab(), &fixture.ctx(), None).unwrap().element;

        let line = &floor["outline"]["segments"][0];
        assert_eq!(line["end"]["x"], 4.0);
        let arc = &floor["outline"]["segments"][1];
        assert_eq!(arc["units"], "mm");
        assert_eq!(arc["startPoint"]["x"], 4000.0);
        assert_eq!(arc["midPoint"]["x"], 4800.0);
        assert_eq!(arc["plane"]["origin"]["x"], 0.0);
        assert_eq!(arc["angleRadians"], 1.5);
    }

    #[test]
    fn unit_fix_can_be_switched_off() {
        let mut fixture = Fixture::new(LevelSet::default());
        fixture.config.curved_unit_fix = false;
        let floor = map_slab(slab(), &fixture.ctx(), None).unwrap().element;
        assert_eq!(floor["outline"]["segments"][1]["startPoint"]["x"], 4.0);
        assert!(floor["outline"]["segments"][1].get("units").is_none());
    }

    #[test]
    fn missing_properties_default_the_offset_to_zero() {
        let fixture = Fixture::new(LevelSet::default());
        let mut source = slab();
        source.as_object_mut().unwrap().remove("elementProperties");
        let floor = map_slab(source, &fixture.ctx(), None).unwrap().element;
        assert_eq!(floor["TopElevationToHomeStory"], 0.0);
        assert_eq!(floor["parameters"][DIVISION]["value"], Value::Null);
    }

    #[test]
    fn hosted_openings_become_shafts_on_the_slab_level() {
        let fixture = Fixture::new(LevelSet::default());
        let mut source = slab();
        source["elements"] = json!([{
            "id": "o1",
            "elementType": "Opening",
            "level": {"name": "Elsewhere", "index": 4},
            "outline": {"value": [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]}
        }]);
        let floor = map_slab(source, &fixture.ctx(), None).unwrap().element;

        let shaft = &floor["elements"][0];
        assert_eq!(shaft["speckle_type"], "Objects.BuiltElements.Revit.RevitShaft");
        assert_eq!(shaft["level"]["name"], "Ground");
        assert_eq!(shaft["bottomLevel"]["name"], "Ground");
        assert_eq!(shaft["outline"]["segments"].as_array().map(Vec::len), Some(3));
    }
}

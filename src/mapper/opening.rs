use serde_json::{json, Value};

use super::parameters::{attach, division, DIVISION};
use super::properties::PropertyReader;
use super::{Host, HostKind, MapContext, Mapped};
use crate::error::TranslateError;
use crate::geometry::outline::polygon_segments;
use crate::locale::{Group, Prop};
use crate::model::record;
use crate::schema::apply;

/// Maps an opening by the orientation of its host.
///
/// Openings cut into walls are passed through unchanged; the receiving side
/// rebuilds them from the wall itself. Openings in slabs and roofs, and
/// openings without a host, become shafts.
pub fn map_opening(
    element: Value,
    ctx: &MapContext<'_>,
    host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    match host.map(|h| h.kind) {
        Some(HostKind::Vertical) => Ok(Mapped::element(element)),
        Some(HostKind::Horizontal) | None => map_shaft(element, ctx, host),
    }
}

fn map_shaft(
    element: Value,
    ctx: &MapContext<'_>,
    host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    let mut shaft = element;
    let props = PropertyReader::new(&shaft, ctx.config.locale);
    let division = division(&props);

    let bottom_level = bottom_level(&shaft, ctx, &props, host);
    let top_level = match shaft.get("topLevel") {
        Some(level) if !level.is_null() => level.clone(),
        _ => bottom_level.clone(),
    };
    let base_offset = props.number_or_zero(Group::General, Prop::BottomElevationHomeStory);
    let top_offset = props.number_or_zero(Group::General, Prop::TopElevationHomeStory);

    let overrides = json!({
        "bottomLevel": bottom_level,
        "topLevel": top_level,
        "parameters": {
            "WALL_BASE_OFFSET": {"value": base_offset},
            "WALL_TOP_OFFSET": {"value": top_offset}
        },
        "outline": {"segments": []}
    });
    let template = ctx.schema.template("shaft_horizontal")?;
    apply(&mut shaft, &template, &overrides)?;

    let coords = record::path(&shaft, &["outline", "value"])
        .and_then(Value::as_array)
        .map(|values| values.iter().map(record::as_number).collect::<Option<Vec<f64>>>());
    match coords {
        Some(Some(coords)) => {
            let units = record::text(&shaft, &["outline", "units"]).unwrap_or("m").to_string();
            let segments: Vec<Value> = polygon_segments(&coords)?
                .into_iter()
                .map(|line| line.to_record(&units))
                .collect();
            if let Some(outline) = record::child_map(&mut shaft, "outline") {
                outline.insert("segments".to_string(), Value::Array(segments));
            }
        }
        Some(None) => {
            return Err(TranslateError::MalformedRecord {
                element: record::label(&shaft),
                field: "outline.value".to_string(),
            });
        }
        None => {
            tracing::warn!(element = %record::label(&shaft), "opening has no outline polygon");
        }
    }

    attach(&mut shaft, DIVISION, division);
    Ok(Mapped::element(shaft))
}

/// Existing bottom level, else the level named in the openings group, else
/// the host level, else the opening's own level.
fn bottom_level(
    opening: &Value,
    ctx: &MapContext<'_>,
    props: &PropertyReader<'_>,
    host: Option<&Host<'_>>,
) -> Value {
    if record::is_set(opening, "bottomLevel") {
        return opening["bottomLevel"].clone();
    }
    let named = props
        .value(Group::Openings, Prop::OpeningLevel)
        .map(record::display)
        .filter(|name| !name.is_empty());
    if let Some(name) = named {
        match ctx.levels.by_name(&name) {
            Some(level) => return level.record.clone(),
            None => {
                let err = TranslateError::UnresolvedLevelLink {
                    reference: format!("no level named '{name}'"),
                };
                tracing::warn!(element = %record::label(opening), "{err}");
            }
        }
    }
    match host {
        Some(host) if !host.level.is_null() => host.level.clone(),
        _ => opening.get("level").cloned().unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelSet;
    use crate::mapper::testing::Fixture;
    use crate::model::StoryDescriptor;
    use pretty_assertions::assert_eq;

    fn levels() -> LevelSet {
        let stories = [
            StoryDescriptor {
                id: Some("L0".to_string()),
                name: Some("Ground".to_string()),
                index: 0,
                elevation: 0.0,
            },
            StoryDescriptor {
                id: Some("L1".to_string()),
                name: Some("First".to_string()),
                index: 1,
                elevation: 3.0,
            },
        ];
        LevelSet::build(&stories, &json!({})).unwrap()
    }

    fn opening() -> Value {
        json!({
            "id": "o1",
            "elementType": "Opening",
            "level": {"name": "Ground", "index": 0},
            "outline": {
                "value": [
                    0.0, 0.0, 0.0,
                    2.0, 0.0, 0.0,
                    2.0, 1.0, 0.0,
                    0.0, 1.0, 0.0,
                    0.0, 0.0, 0.0
                ]
            },
            "elementProperties": {
                "General Parameters": {
                    "Bottom Elevation To Home Story": -0.2,
                    "Top Elevation To Home Story": 0.3
                },
                "OPENINGS": {"spk_opening_level": "First"}
            }
        })
    }

    #[test]
    fn openings_in_walls_pass_through() {
        let fixture = Fixture::new(levels());
        let level = json!({"name": "Ground"});
        let host = Host {
            kind: HostKind::Vertical,
            level: &level,
            frame: None,
        };
        let mapped = map_opening(opening(), &fixture.ctx(), Some(&host)).unwrap();
        assert_eq!(mapped.element, opening());
    }

    #[test]
    fn unhosted_openings_become_shafts() {
        let fixture = Fixture::new(levels());
        let shaft = map_opening(opening(), &fixture.ctx(), None).unwrap().element;

        assert_eq!(shaft["speckle_type"], "Objects.BuiltElements.Revit.RevitShaft");
        assert_eq!(shaft["bottomLevel"]["id"], "L1");
        assert_eq!(shaft["topLevel"]["id"], "L1");
        assert_eq!(shaft["parameters"]["WALL_BASE_OFFSET"]["value"], -0.2);
        assert_eq!(shaft["parameters"]["WALL_TOP_OFFSET"]["value"], 0.3);

        let segments = shaft["outline"]["segments"].as_array().unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0]["speckle_type"], "Objects.Geometry.Line");
        assert_eq!(segments[1]["start"]["x"], 2.0);
        assert_eq!(segments[3]["end"], segments[0]["start"]);
        assert_eq!(shaft["outline"]["closed"], true);
    }

    #[test]
    fn unknown_opening_level_falls_back_to_the_host() {
        let fixture = Fixture::new(levels());
        let mut source = opening();
        source["elementProperties"]["OPENINGS"]["spk_opening_level"] = json!("Attic");
        let level = json!({"name": "Slab level"});
        let host = Host {
            kind: HostKind::Horizontal,
            level: &level,
            frame: None,
        };
        let shaft = map_opening(source, &fixture.ctx(), Some(&host)).unwrap().element;
        assert_eq!(shaft["bottomLevel"]["name"], "Slab level");
        assert_eq!(shaft["topLevel"]["name"], "Slab level");
    }

    #[test]
    fn existing_levels_are_kept() {
        let fixture = Fixture::new(levels());
        let mut source = opening();
        source["bottomLevel"] = json!({"name": "Ground"});
        source["topLevel"] = json!({"name": "Roof"});
        let shaft = map_opening(source, &fixture.ctx(), None).unwrap().element;
        assert_eq!(shaft["bottomLevel"]["name"], "Ground");
        assert_eq!(shaft["topLevel"]["name"], "Roof");
    }

    #[test]
    fn short_polygons_are_degenerate() {
        let fixture = Fixture::new(levels());
        let mut source = opening();
        source["outline"]["value"] = json!([0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(matches!(
            map_opening(source, &fixture.ctx(), None),
            Err(TranslateError::DegenerateGeometry { .. })
        ));
    }
}

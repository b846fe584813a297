use serde_json::{json, Value};

use super::column::{anchor_justification, assembly_path};
use super::parameters::{attach, division, DIVISION};
use super::properties::PropertyReader;
use super::{Host, MapContext, Mapped};
use crate::error::TranslateError;
use crate::locale::{Group, Prop};
use crate::model::record;
use crate::schema::apply;

/// Maps a beam onto a structural framing member.
///
/// The cross-section label comes from the localized general parameters, the
/// justification from the anchor point table shared with columns.
pub fn map_beam(
    element: Value,
    ctx: &MapContext<'_>,
    _host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    let mut beam = element;
    let props = PropertyReader::new(&beam, ctx.config.locale);
    let division = division(&props);

    let (jy, jz) = anchor_justification(&beam)?.ok_or_else(|| TranslateError::MalformedRecord {
        element: record::label(&beam),
        field: "anchorPoint".to_string(),
    })?;

    let overrides = json!({
        "type": type_label(&beam, &props),
        "parameters": {
            "Y_JUSTIFICATION": {"value": jy},
            "Z_JUSTIFICATION": {"value": jz},
            "Y_OFFSET_VALUE": {"value": beam.get("offset").cloned().unwrap_or(Value::Null)}
        }
    });

    let template = ctx.schema.template("beam")?;
    apply(&mut beam, &template, &overrides)?;

    attach(&mut beam, DIVISION, division);
    Ok(Mapped::element(beam))
}

fn type_label(beam: &Value, props: &PropertyReader<'_>) -> String {
    let material = record::text(beam, &assembly_path("buildingMaterial"))
        .or_else(|| record::text(beam, &assembly_path("profileAttrName")))
        .unwrap_or_default();
    let surface = record::path(beam, &["segments", "Segment #1", "topMaterial"])
        .map(|s| format!(" {}", record::display(s)))
        .unwrap_or_default();
    let width = props.text_or_empty(Group::General, Prop::CrossSectionWidth);
    let height = props.text_or_empty(Group::General, Prop::CrossSectionHeight);
    format!("{material} {width}x{height}{surface}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelSet;
    use crate::mapper::testing::Fixture;
    use pretty_assertions::assert_eq;

    fn beam() -> Value {
        json!({
            "id": "b1",
            "elementType": "Beam",
            "anchorPoint": 5,
            "offset": 0.05,
            "segments": {
                "Segment #1": {
                    "assemblySegmentData": {
                        "buildingMaterial": "",
                        "profileAttrName": "IPE 300"
                    },
                    "topMaterial": "Paint"
                }
            },
            "elementProperties": {
                "General Parameters": {
                    "Cross Section Width at Bottom Start (cut)": 0.15,
                    "Cross Section Height at Bottom Start (cut)": 0.3
                },
                "BUILDING INFORMATION": {"RLL-Building Part": "C"}
            }
        })
    }

    #[test]
    fn beam_carries_justification_and_label() {
        let fixture = Fixture::new(LevelSet::default());
        let mapped = map_beam(beam(), &fixture.ctx(), None).unwrap().element;

        assert_eq!(mapped["type"], "IPE 300 0.15x0.3 Paint");
        assert_eq!(mapped["parameters"]["Y_JUSTIFICATION"]["value"], 3);
        assert_eq!(mapped["parameters"]["Z_JUSTIFICATION"]["value"], 1);
        assert_eq!(mapped["parameters"]["Y_OFFSET_VALUE"]["value"], 0.05);
        assert_eq!(
            mapped["parameters"]["Y_OFFSET_VALUE"]["applicationInternalName"],
            "Y_OFFSET_VALUE"
        );
        assert_eq!(mapped["category"], "Structural Framing");
        assert_eq!(mapped["parameters"][DIVISION]["value"], "C");
    }

    #[test]
    fn building_material_wins_over_profile() {
        let fixture = Fixture::new(LevelSet::default());
        let mut source = beam();
        source["segments"]["Segment #1"]["assemblySegmentData"]["buildingMaterial"] =
            json!("Timber");
        source["segments"]["Segment #1"]
            .as_object_mut()
            .unwrap()
            .remove("topMaterial");
        let mapped = map_beam(source, &fixture.ctx(), None).unwrap().element;
        assert_eq!(mapped["type"], "Timber 0.15x0.3");
    }

    #[test]
    fn anchor_point_is_required() {
        let fixture = Fixture::new(LevelSet::default());
        for anchor in [Value::Null, json!(12)] {
            let mut source = beam();
            source["anchorPoint"] = anchor;
            assert!(matches!(
                map_beam(source, &fixture.ctx(), None),
                Err(TranslateError::MalformedRecord { .. })
            ));
        }
    }
}

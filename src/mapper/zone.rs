//! Zone mapper.
//!
//! Zones become rooms. Revit bounds rooms by separation lines rather than by
//! an outline on the room itself, so every outline segment is also emitted
//! as a standalone boundary line for the walker to collect.

use serde_json::{json, Value};

use super::parameters::{area_parameter, attach, division, parameter, DIVISION};
use super::properties::PropertyReader;
use super::{Host, MapContext, Mapped};
use crate::error::TranslateError;
use crate::locale::{Group, Prop};
use crate::model::record;
use crate::schema::apply;

pub const BOUNDARY_TYPE: &str = "Objects.BuiltElements.Revit.Curve.RoomBoundaryLine";

pub const APARTMENT_LOCATION: &str = "RLL_Позиція_Кв";
pub const APARTMENT_NUMBER: &str = "ADSK_Номер квартиры";
pub const AREA_COEFFICIENT: &str = "ADSK_Коэффициент площади";
pub const APARTMENT_AREA: &str = "ADSK_Площадь квартиры";
pub const APARTMENT_TOTAL_AREA: &str = "ADSK_Площадь квартиры общая";
pub const APARTMENT_LIVING_AREA: &str = "ADSK_Площадь квартиры жилая";
pub const ROOM_TYPE: &str = "ADSK_Тип помещения";

pub fn map_zone(
    element: Value,
    ctx: &MapContext<'_>,
    _host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    let mut room = element;
    let props = PropertyReader::new(&room, ctx.config.locale);
    let zones = |prop| props.value_or_null(Group::Zones, prop);

    let number = props.value_or_null(Group::ZoneSummary, Prop::ZoneNumber);
    let location = props.value_or_null(Group::ZoneSummary, Prop::ApartmentLocation);
    let extra = [
        (APARTMENT_LOCATION, parameter(APARTMENT_LOCATION, location)),
        (APARTMENT_NUMBER, parameter(APARTMENT_NUMBER, zones(Prop::ZoneGid))),
        (AREA_COEFFICIENT, parameter(AREA_COEFFICIENT, zones(Prop::ZoneCoefficient))),
        (APARTMENT_AREA, area_parameter(APARTMENT_AREA, zones(Prop::ZoneFlatArea))),
        (
            APARTMENT_TOTAL_AREA,
            area_parameter(APARTMENT_TOTAL_AREA, zones(Prop::ZoneTotalArea)),
        ),
        (
            APARTMENT_LIVING_AREA,
            area_parameter(APARTMENT_LIVING_AREA, zones(Prop::ZoneLivingArea)),
        ),
        (ROOM_TYPE, parameter(ROOM_TYPE, zones(Prop::ZoneType))),
    ];
    let division = division(&props);

    let boundaries = boundary_lines(&room);

    let overrides = json!({
        "type": "Room",
        "number": number.clone(),
        "parameters": {
            "ROOM_OCCUPANCY": {"value": ""},
            "ROOM_NUMBER": {"value": number},
            "ROOM_DEPARTMENT": {"value": zones(Prop::ZoneFunction)}
        }
    });
    let template = ctx.schema.template("room")?;
    apply(&mut room, &template, &overrides)?;

    attach(&mut room, DIVISION, division);
    for (name, param) in extra {
        attach(&mut room, name, param);
    }
    Ok(Mapped {
        element: room,
        synthesized: boundaries,
    })
}

fn boundary_lines(zone: &Value) -> Vec<Value> {
    let level = zone.get("level").cloned().unwrap_or(Value::Null);
    let Some(segments) = record::path(zone, &["outline", "segments"]).and_then(Value::as_array) else {
        tracing::warn!(element = %record::label(zone), "zone has no outline segments");
        return Vec::new();
    };
    segments
        .iter()
        .map(|segment| {
            json!({
                "level": level.clone(),
                "units": "m",
                "baseCurve": segment.clone(),
                "speckle_type": BOUNDARY_TYPE,
            })
        })
        .collect()
}

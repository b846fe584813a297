//! Revit parameter records attached after schema stamping.

use serde_json::{json, Value};

use super::properties::PropertyReader;
use crate::locale::{Group, Prop};
use crate::model::record;

pub const PARAMETER_TYPE: &str = "Objects.BuiltElements.Revit.Parameter";
const SQUARE_METRES: &str = "autodesk.unit.unit:squareMeters-1.0.1";

pub const DIVISION: &str = "MRT_Division";
pub const DISCIPLINE: &str = "MRT_Discipline";

/// A unitless instance parameter.
#[must_use]
pub fn parameter(name: &str, value: Value) -> Value {
    json!({
        "name": name,
        "speckle_type": PARAMETER_TYPE,
        "applicationId": null,
        "applicationInternalName": name,
        "applicationUnit": null,
        "applicationUnitType": null,
        "isReadOnly": false,
        "isShared": false,
        "isTypeParameter": false,
        "units": null,
        "value": value,
    })
}

/// An area parameter in square metres.
#[must_use]
pub fn area_parameter(name: &str, value: Value) -> Value {
    let mut param = parameter(name, value);
    record::set(&mut param, "applicationUnit", Value::from(SQUARE_METRES));
    record::set(&mut param, "units", Value::from("m²"));
    param
}

/// Stores `param` under `parameters.<name>` of `element`.
pub fn attach(element: &mut Value, name: &str, param: Value) {
    if let Some(parameters) = record::child_map(element, "parameters") {
        parameters.insert(name.to_string(), param);
    }
}

/// Building part the element belongs to, from the building information group.
#[must_use]
pub fn division(props: &PropertyReader<'_>) -> Value {
    parameter(DIVISION, props.value_or_null(Group::BuildingInfo, Prop::BuildingPart))
}

/// Discipline tag from the building information group.
#[must_use]
pub fn discipline(props: &PropertyReader<'_>) -> Value {
    parameter(DISCIPLINE, props.value_or_null(Group::BuildingInfo, Prop::Discipline))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_parameters_carry_units() {
        let p = area_parameter("ADSK_Площадь квартиры", json!(54.2));
        assert_eq!(p["units"], "m²");
        assert_eq!(p["applicationUnit"], SQUARE_METRES);
        assert_eq!(p["value"], 54.2);
    }

    #[test]
    fn attach_creates_the_parameters_node() {
        let mut element = json!({"id": "x"});
        attach(&mut element, DIVISION, parameter(DIVISION, json!("A")));
        assert_eq!(element["parameters"][DIVISION]["value"], "A");
        assert_eq!(element["parameters"][DIVISION]["applicationInternalName"], DIVISION);
    }
}

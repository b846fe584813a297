use serde_json::{json, Value};

use crate::error::TranslateError;
use crate::model::record;

pub const POINT_TYPE: &str = "Objects.Geometry.Point";
pub const VECTOR_TYPE: &str = "Objects.Geometry.Vector";
pub const LINE_TYPE: &str = "Objects.Geometry.Line";
pub const PLANE_TYPE: &str = "Objects.Geometry.Plane";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Reads a point record; `z` defaults to zero for planar exports.
    pub fn from_record(element: &Value, keys: &[&str]) -> Result<Self, TranslateError> {
        let x = record::require_number(element, &axis_path(keys, "x"))?;
        let y = record::require_number(element, &axis_path(keys, "y"))?;
        let z = record::number(element, &axis_path(keys, "z")).unwrap_or(0.0);
        Ok(Self::new(x, y, z))
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    #[must_use]
    pub fn to_record(self, units: &str) -> Value {
        json!({
            "x": self.x,
            "y": self.y,
            "z": self.z,
            "units": units,
            "speckle_type": POINT_TYPE,
        })
    }

    #[must_use]
    pub fn distance_to(self, other: Point3) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    #[must_use]
    pub const fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn to_record(self, units: &str) -> Value {
        json!({
            "start": self.start.to_record(units),
            "end": self.end.to_record(units),
            "units": units,
            "speckle_type": LINE_TYPE,
        })
    }
}

fn axis_path<'a>(keys: &[&'a str], axis: &'a str) -> Vec<&'a str> {
    let mut full = keys.to_vec();
    full.push(axis);
    full
}

fn vector_record(x: f64, y: f64, z: f64, units: &str) -> Value {
    json!({"x": x, "y": y, "z": z, "units": units, "speckle_type": VECTOR_TYPE})
}

/// World XY plane at the origin.
#[must_use]
pub fn identity_plane(units: &str) -> Value {
    json!({
        "origin": Point3::new(0.0, 0.0, 0.0).to_record(units),
        "normal": vector_record(0.0, 0.0, 1.0, units),
        "xdir": vector_record(1.0, 0.0, 0.0, units),
        "ydir": vector_record(0.0, 1.0, 0.0, units),
        "units": units,
        "speckle_type": PLANE_TYPE,
    })
}

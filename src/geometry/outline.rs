//! Outline helpers for horizontal elements and shafts.

use serde_json::{json, Value};

use super::primitives::{identity_plane, Line, Point3};
use crate::error::TranslateError;

const METRES_TO_MILLIMETRES: f64 = 1000.0;

/// `true` for outline segments exported as arcs.
#[must_use]
pub fn is_curved_segment(segment: &Value) -> bool {
    segment.get("plane").is_some()
}

/// Override set that restates a curved outline segment in millimetres.
///
/// The exchange server skips unit conversion on arc segments of slabs and
/// roofs, so the points are scaled by hand and tagged `mm`, and the plane is
/// reset to world XY.
pub fn curved_segment_millimetres(segment: &Value) -> Result<Value, TranslateError> {
    let point = |key: &str| {
        Point3::from_record(segment, &[key]).map(|p| p.scaled(METRES_TO_MILLIMETRES).to_record("mm"))
    };
    Ok(json!({
        "plane": identity_plane("mm"),
        "startPoint": point("startPoint")?,
        "midPoint": point("midPoint")?,
        "endPoint": point("endPoint")?,
        "angleRadians": segment.get("angleRadians").cloned().unwrap_or(Value::Null),
    }))
}

/// Rebuilds line segments from a flat `[x0, y0, z0, x1, ...]` polygon.
///
/// The exported list repeats the first vertex at the end; the closing
/// segment is rebuilt from the last distinct vertex back to the first, so a
/// list of `n` vertices yields `n - 1` segments.
pub fn polygon_segments(coords: &[f64]) -> Result<Vec<Line>, TranslateError> {
    if coords.len() % 3 != 0 || coords.len() < 9 {
        return Err(TranslateError::DegenerateGeometry {
            reason: format!(
                "polygon outline needs at least three xyz triples, got {} values",
                coords.len()
            ),
        });
    }
    let points: Vec<Point3> = coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    // the last point duplicates the first
    let distinct = &points[..points.len() - 1];

    let mut segments: Vec<Line> = distinct
        .windows(2)
        .map(|pair| Line::new(pair[0], pair[1]))
        .collect();
    segments.push(Line::new(distinct[distinct.len() - 1], distinct[0]));
    Ok(segments)
}

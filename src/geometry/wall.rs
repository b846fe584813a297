//! Reference line reconciliation for walls.
//!
//! Archicad authors a wall against one of six reference lines (faces or core
//! faces), while Revit positions every wall by a location line code around a
//! uniform centreline. Straight walls are shifted perpendicular to their axis;
//! curved walls are re-anchored on the same arc.

use std::f64::consts::{FRAC_PI_2, PI};

use serde_json::{json, Value};

use super::primitives::{identity_plane, Line, Point3};
use super::vector::direction;
use crate::error::TranslateError;

/// Archicad reference line location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceLine {
    Center,
    CoreCenter,
    Outside,
    Inside,
    CoreOutside,
    CoreInside,
}

impl ReferenceLine {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "Center" => Some(Self::Center),
            "Core Center" => Some(Self::CoreCenter),
            "Outside" => Some(Self::Outside),
            "Inside" => Some(Self::Inside),
            "Core Outside" => Some(Self::CoreOutside),
            "Core Inside" => Some(Self::CoreInside),
            _ => None,
        }
    }

    /// Revit `WALL_KEY_REF_PARAM` location line code.
    #[must_use]
    pub fn revit_code(self) -> i64 {
        match self {
            Self::Center => 0,      // wall centerline
            Self::CoreCenter => 1,  // core centerline
            Self::Outside => 2,     // finish face: exterior
            Self::Inside => 3,      // finish face: interior
            Self::CoreOutside => 4, // core face: exterior
            Self::CoreInside => 5,  // core face: interior
        }
    }

    /// Side of the arc the reference line sits on.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Center | Self::CoreCenter | Self::CoreOutside => 1.0,
            Self::Outside | Self::Inside | Self::CoreInside => -1.0,
        }
    }
}

fn check_thickness(thickness: f64) -> Result<(), TranslateError> {
    if thickness > 0.0 && thickness.is_finite() {
        Ok(())
    } else {
        Err(TranslateError::DegenerateGeometry {
            reason: format!("wall thickness {thickness} is not positive"),
        })
    }
}

/// Centreline of a straight wall.
///
/// The reference line is shifted by `offset_from_outside - thickness / 2`
/// along the left normal of the axis, mirrored when the wall is flipped.
pub fn straight_centerline(
    reference: Line,
    thickness: f64,
    offset_from_outside: f64,
    flipped: bool,
) -> Result<Line, TranslateError> {
    check_thickness(thickness)?;
    let dir = direction(reference.start, reference.end)?;
    let flip = if flipped { -1.0 } else { 1.0 };
    let shift = offset_from_outside - thickness / 2.0;
    let off_x = shift * dir.y * flip * -1.0;
    let off_y = shift * dir.x * flip;

    let moved = |p: Point3| Point3::new(p.x + off_x, p.y + off_y, p.z);
    Ok(Line::new(moved(reference.start), moved(reference.end)))
}

/// Radius of the circle through a chord of length `chord` spanning `angle` radians.
pub fn arc_radius(chord: f64, angle: f64) -> Result<f64, TranslateError> {
    let half_sine = (angle / 2.0).sin();
    if half_sine == 0.0 || !half_sine.is_finite() || chord <= 0.0 {
        return Err(TranslateError::DegenerateGeometry {
            reason: format!("no arc for chord {chord} and angle {angle}"),
        });
    }
    Ok(chord / (2.0 * half_sine))
}

/// A three point arc in the world XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start: Point3,
    pub mid: Point3,
    pub end: Point3,
    pub angle: f64,
}

impl Arc {
    /// Override set for a curved baseline template.
    #[must_use]
    pub fn to_override(self, units: &str) -> Value {
        json!({
            "plane": identity_plane(units),
            "startPoint": self.start.to_record(units),
            "midPoint": self.mid.to_record(units),
            "endPoint": self.end.to_record(units),
            "angleRadians": self.angle,
        })
    }
}

/// Re-anchors a curved wall on its arc.
///
/// `reference` is the chord between the arc ends, `chord` its exported
/// length and `angle` the arc angle; positive angles bulge to the right of
/// the chord direction, negative ones to the left. The arc midpoint is
/// rebuilt from the chord bisector, then all three points move by half the
/// thickness along their radial direction, towards the side given by
/// `location`.
pub fn curved_centerline(
    reference: Line,
    chord: f64,
    angle: f64,
    thickness: f64,
    location: ReferenceLine,
) -> Result<Arc, TranslateError> {
    check_thickness(thickness)?;
    let t = thickness / 2.0;
    if angle >= 0.0 {
        return positive_arc(reference, chord, angle, t, location.sign());
    }
    // a left-bulging arc is the right-bulging arc of the reversed chord, with the sides swapped
    let reversed = Line::new(reference.end, reference.start);
    let arc = positive_arc(reversed, chord, -angle, t, -location.sign())?;
    Ok(Arc {
        start: arc.end,
        mid: arc.mid,
        end: arc.start,
        angle,
    })
}

fn positive_arc(
    reference: Line,
    chord: f64,
    angle: f64,
    t: f64,
    bdir: f64,
) -> Result<Arc, TranslateError> {
    let Line { start, end } = reference;
    let (sx, sy, ex, ey) = (start.x, start.y, end.x, end.y);
    let radius = arc_radius(chord, angle)?;

    let slope_angle = chord_normal_angle(start, end)?;
    let start_angle = (FRAC_PI_2 - angle / 2.0) - (FRAC_PI_2 - slope_angle);
    let end_angle = PI - (FRAC_PI_2 - angle / 2.0) - (FRAC_PI_2 - slope_angle);

    // distance from the circle centre to the chord; clamp rounding below zero at half circles
    let hypo = (radius * radius - (chord / 2.0).powi(2)).max(0.0).sqrt();
    let dx = (sx + ex) / 2.0;
    let dy = (sy + ey) / 2.0;

    // the bisector angle of a vertical chord is a limit, its sign comes from the rise
    let side = if ex == sx {
        -(ey - sy).signum()
    } else {
        (dx - sx).signum() * slope_angle.signum()
    };
    let mvx = -side;
    let svx = side;
    let evx = side;

    let mx = dx + (radius - hypo) * slope_angle.cos() * mvx;
    let my = dy + (radius - hypo) * slope_angle.sin() * mvx;

    let mid = Point3::new(
        mx + t * slope_angle.cos() * -mvx * bdir,
        my + t * slope_angle.sin() * -mvx * bdir,
        start.z,
    );
    let new_start = Point3::new(
        sx + t * start_angle.cos() * svx * bdir,
        sy + t * start_angle.sin() * svx * bdir,
        start.z,
    );
    let new_end = Point3::new(
        ex + t * end_angle.cos() * evx * bdir,
        ey + t * end_angle.sin() * evx * bdir,
        start.z,
    );

    Ok(Arc {
        start: new_start,
        mid,
        end: new_end,
        angle,
    })
}

/// Angle of the chord bisector, `atan(-1 / slope)`, with the axis-aligned limits made explicit.
fn chord_normal_angle(start: Point3, end: Point3) -> Result<f64, TranslateError> {
    let run = end.x - start.x;
    let rise = end.y - start.y;
    if run == 0.0 && rise == 0.0 {
        return Err(TranslateError::DegenerateGeometry {
            reason: "curved wall chord has coincident ends".to_string(),
        });
    }
    if run == 0.0 {
        return Ok(0.0);
    }
    if rise == 0.0 {
        return Ok(-FRAC_PI_2);
    }
    Ok((-1.0 / (rise / run)).atan())
}

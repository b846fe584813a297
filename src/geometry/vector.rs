use super::primitives::Point3;
use crate::error::TranslateError;

/// Unit vector in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
}

/// Unit direction of the line `start -> end`, ignoring `z`.
///
/// # Errors
///
/// Returns [`TranslateError::DegenerateGeometry`] for coincident endpoints.
pub fn direction(start: Point3, end: Point3) -> Result<Direction, TranslateError> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let magnitude = (dx * dx + dy * dy).sqrt();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Err(TranslateError::DegenerateGeometry {
            reason: format!(
                "no direction between ({}, {}) and ({}, {})",
                start.x, start.y, end.x, end.y
            ),
        });
    }
    Ok(Direction {
        x: dx / magnitude,
        y: dy / magnitude,
    })
}

/// Local frame of a host wall: its reference line start and axis direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallFrame {
    pub origin: Point3,
    pub direction: Direction,
}

impl WallFrame {
    /// Point `along` metres down the wall axis, raised by `lift`.
    #[must_use]
    pub fn locate(&self, along: f64, lift: f64) -> Point3 {
        Point3::new(
            self.origin.x + along * self.direction.x,
            self.origin.y + along * self.direction.y,
            self.origin.z + lift,
        )
    }

    /// Homogeneous 4x4 row-major translation to [`WallFrame::locate`].
    #[must_use]
    pub fn placement_matrix(&self, along: f64, lift: f64) -> [f64; 16] {
        let p = self.locate(along, lift);
        [
            1.0, 0.0, 0.0, p.x, //
            0.0, 1.0, 0.0, p.y, //
            0.0, 0.0, 1.0, p.z, //
            0.0, 0.0, 0.0, 1.0,
        ]
    }
}

pub mod outline;
pub mod primitives;
pub mod vector;
pub mod wall;

pub use primitives::{identity_plane, Line, Point3};
pub use vector::{direction, Direction, WallFrame};
pub use wall::{arc_radius, curved_centerline, straight_centerline, Arc, ReferenceLine};

pub mod link;
pub mod set;

pub use link::{parse_top_link, resolve_top_level, TopLink};
pub use set::LevelSet;

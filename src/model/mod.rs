pub mod category;
pub mod collection;
pub mod level;
pub mod record;

pub use category::{Category, CategorySet};
pub use collection::new_collection;
pub use level::{Level, StoryDescriptor};

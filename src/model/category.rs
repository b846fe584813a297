use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::TranslateError;

/// Element categories with a registered mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Beam,
    Column,
    Door,
    Opening,
    Roof,
    Slab,
    Wall,
    Window,
    Zone,
}

// Localized element type names seen on hosted sub-elements.
const ALIASES: &[(&str, Category)] = &[
    ("двері", Category::Door),
    ("вікно", Category::Window),
    ("отвір", Category::Opening),
    ("стіна", Category::Wall),
    ("перекриття", Category::Slab),
    ("дах", Category::Roof),
    ("колона", Category::Column),
    ("балка", Category::Beam),
    ("зона", Category::Zone),
];

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Beam,
        Category::Column,
        Category::Door,
        Category::Opening,
        Category::Roof,
        Category::Slab,
        Category::Wall,
        Category::Window,
        Category::Zone,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::Beam => "beam",
            Category::Column => "column",
            Category::Door => "door",
            Category::Opening => "opening",
            Category::Roof => "roof",
            Category::Slab => "slab",
            Category::Wall => "wall",
            Category::Window => "window",
            Category::Zone => "zone",
        }
    }

    /// Case-insensitive lookup by English or localized element type name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == name)
                    .map(|(_, c)| *c)
            })
    }

    /// Name of the target schema template this category is stamped with.
    #[must_use]
    pub fn template_node(self) -> &'static str {
        match self {
            Category::Beam => "beam",
            Category::Column => "column",
            Category::Door => "door",
            Category::Opening => "shaft_horizontal",
            Category::Roof => "roof",
            Category::Slab => "floor",
            Category::Wall => "wall",
            Category::Window => "window",
            Category::Zone => "room",
        }
    }

    /// Categories that live inside a host element rather than on their own.
    #[must_use]
    pub fn is_hosted(self) -> bool {
        matches!(self, Category::Door | Category::Window | Category::Opening)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TranslateError::UnmappedCategory {
            name: s.to_string(),
        })
    }
}

/// Active category allow-list for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Builds the allow-list from explicit names; any unknown name is an error.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, TranslateError> {
        let mut categories = names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<Category>, _>>()?;
        categories.sort();
        categories.dedup();
        Ok(Self { categories })
    }

    /// Builds the allow-list from schema category names, silently dropping unmapped ones.
    pub fn from_known<'a, I: IntoIterator<Item = &'a str>>(names: I) -> Self {
        let mut categories: Vec<Category> = names.into_iter().filter_map(Category::parse).collect();
        categories.sort();
        categories.dedup();
        Self { categories }
    }

    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

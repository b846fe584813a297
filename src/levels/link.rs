//! Top link story resolution.
//!
//! Archicad reports the story an element's top is attached to as free text
//! in the general parameters, e.g. `"Home + 2 (Roof)"`. The accepted grammar
//! is an optional signed story offset (`+ N` / `- N`) relative to the home
//! story and an optional trailing level name in parentheses. The offset wins
//! when it resolves; the name is the fallback.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use super::set::LevelSet;
use crate::error::TranslateError;
use crate::model::record;
use crate::model::Level;

fn offset_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([+-])\s*(\d+)").expect("valid offset pattern"))
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(([^()]*)\)\s*$").expect("valid name pattern"))
}

/// Parsed top link reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLink {
    /// Stories above (positive) or below the home story.
    pub offset: Option<i64>,
    /// Target level name, when the text carries one.
    pub name: Option<String>,
}

/// Parses the top link text; empty text means the element is not linked.
///
/// # Errors
///
/// Returns [`TranslateError::UnresolvedLevelLink`] for text with neither an
/// offset nor a level name.
pub fn parse_top_link(text: &str) -> Result<Option<TopLink>, TranslateError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let name_caps = name_pattern().captures(text);
    // level names may contain signed numbers themselves, so only the head carries the offset
    let head = name_caps
        .as_ref()
        .and_then(|caps| caps.get(0))
        .map_or(text, |m| &text[..m.start()]);

    let offset = offset_pattern().captures(head).and_then(|caps| {
        let stories: i64 = caps[2].parse().ok()?;
        Some(if &caps[1] == "-" { -stories } else { stories })
    });
    let name = name_caps
        .map(|caps| caps[1].trim().to_string())
        .filter(|n| !n.is_empty());

    if offset.is_none() && name.is_none() {
        return Err(TranslateError::UnresolvedLevelLink {
            reference: text.to_string(),
        });
    }
    Ok(Some(TopLink { offset, name }))
}

impl TopLink {
    /// Finds the linked level for an element whose home story has `home_index`.
    pub fn resolve<'a>(
        &self,
        home_index: Option<i64>,
        levels: &'a LevelSet,
    ) -> Result<&'a Level, TranslateError> {
        let by_offset = match (self.offset, home_index) {
            (Some(offset), Some(home)) => {
                home.checked_add(offset).and_then(|index| levels.by_index(index))
            }
            _ => None,
        };
        let by_name = || self.name.as_deref().and_then(|n| levels.by_name(n));

        by_offset
            .or_else(by_name)
            .ok_or_else(|| TranslateError::UnresolvedLevelLink {
                reference: self.describe(home_index),
            })
    }

    fn describe(&self, home_index: Option<i64>) -> String {
        match (self.offset, home_index, &self.name) {
            (Some(offset), Some(home), _) => match home.checked_add(offset) {
                Some(index) => format!("no level with index {index}"),
                None => format!("story offset {offset} from index {home} is out of range"),
            },
            (Some(_), None, _) => "element has no home story index".to_string(),
            (None, _, Some(name)) => format!("no level named '{name}'"),
            (None, _, None) => "empty link".to_string(),
        }
    }
}

/// Resolves the level an element's top is linked to.
///
/// `link_text` is the localized top link story property. Unparseable or
/// dangling links are logged and yield `None`, leaving the fallback to the
/// caller.
#[must_use]
pub fn resolve_top_level<'a>(
    element: &Value,
    link_text: &str,
    levels: &'a LevelSet,
) -> Option<&'a Level> {
    let home_index = record::integer(element, &["level", "index"]);
    let resolved = parse_top_link(link_text).and_then(|link| match link {
        Some(link) => link.resolve(home_index, levels).map(Some),
        None => Ok(None),
    });

    match resolved {
        Ok(level) => level,
        Err(err) => {
            tracing::warn!(element = %record::label(element), link = link_text, "{err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoryDescriptor;
    use serde_json::json;

    fn levels(indices: &[i64]) -> LevelSet {
        let stories: Vec<StoryDescriptor> = indices
            .iter()
            .map(|&index| StoryDescriptor {
                id: None,
                name: Some(format!("Story {index}")),
                index,
                elevation: index as f64 * 3.0,
            })
            .collect();
        LevelSet::build(&stories, &json!({})).unwrap()
    }

    #[test]
    fn parses_offsets_and_names() {
        assert_eq!(
            parse_top_link("Home + 3 (Story 8)").unwrap(),
            Some(TopLink {
                offset: Some(3),
                name: Some("Story 8".to_string())
            })
        );
        assert_eq!(
            parse_top_link("+ 2").unwrap(),
            Some(TopLink {
                offset: Some(2),
                name: None
            })
        );
        assert_eq!(
            parse_top_link("Home - 1").unwrap().and_then(|l| l.offset),
            Some(-1)
        );
        assert_eq!(
            parse_top_link("(Level -1)").unwrap(),
            Some(TopLink {
                offset: None,
                name: Some("Level -1".to_string())
            })
        );
        assert_eq!(parse_top_link("  ").unwrap(), None);
        assert!(parse_top_link("Not Linked").is_err());
    }

    #[test]
    fn offset_is_relative_to_the_home_story() {
        let set = levels(&[5, 6, 7, 8]);
        let wall = json!({"level": {"index": 5}});
        let level = resolve_top_level(&wall, "Home + 3 (Story 8)", &set).unwrap();
        assert_eq!(level.index, 8);
    }

    #[test]
    fn missing_target_index_yields_none() {
        let set = levels(&[5, 6, 7]);
        let wall = json!({"level": {"index": 5}});
        assert!(resolve_top_level(&wall, "+ 3", &set).is_none());
    }

    #[test]
    fn out_of_range_offset_falls_back() {
        let set = levels(&[5, 6]);
        let wall = json!({"level": {"index": 5}});
        assert!(resolve_top_level(&wall, "Home + 9223372036854775807", &set).is_none());

        let link = parse_top_link("Home + 9223372036854775807 (Story 6)").unwrap().unwrap();
        assert_eq!(link.resolve(Some(5), &set).unwrap().index, 6);
        let link = parse_top_link("Home + 9223372036854775807").unwrap().unwrap();
        let err = link.resolve(Some(5), &set).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn name_is_used_when_the_offset_misses() {
        let set = levels(&[0, 1, 2]);
        let link = parse_top_link("Home + 9 (Story 1)").unwrap().unwrap();
        assert_eq!(link.resolve(Some(0), &set).unwrap().index, 1);
        let link = parse_top_link("(Story 2)").unwrap().unwrap();
        assert_eq!(link.resolve(None, &set).unwrap().index, 2);
    }

    #[test]
    fn dangling_links_report_the_index() {
        let set = levels(&[0]);
        let link = parse_top_link("+ 4").unwrap().unwrap();
        assert_eq!(
            link.resolve(Some(1), &set).unwrap_err(),
            TranslateError::UnresolvedLevelLink {
                reference: "no level with index 5".to_string()
            }
        );
    }
}

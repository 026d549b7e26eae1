//! The story shipped with Inkline.

use crate::error::StoryResult;
use crate::story::StoryGraph;

/// Source of the built-in story.
pub const MIDNIGHT_JSON: &str = include_str!("../stories/midnight.json");

/// Load "Escape Before Midnight".
pub fn midnight() -> StoryResult<StoryGraph> {
    StoryGraph::from_json(MIDNIGHT_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_story_is_valid() {
        let story = midnight().unwrap();
        assert_eq!(story.meta.title, "Escape Before Midnight");
        assert_eq!(story.start().as_str(), "start");
        assert_eq!(story.fallback().map(|f| f.as_str()), Some("missing_item_fallback"));
        assert_eq!(story.timeout().map(|t| t.as_str()), Some("midnight_ending"));
        assert_eq!(story.ending_count(), 7);
    }

    #[test]
    fn every_builtin_scene_is_reachable() {
        let story = midnight().unwrap();
        assert!(story.unreachable().is_empty(), "{:?}", story.unreachable());
    }

    #[test]
    fn builtin_endings_keep_their_labels() {
        let story = midnight().unwrap();
        assert!(story.get("ending_fire").unwrap().text.contains("roaring inferno"));
        assert!(story.get("ending_safe").unwrap().text.contains("(Safe Ending)"));
    }
}

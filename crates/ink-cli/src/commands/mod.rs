pub mod check;
pub mod play;
pub mod scenes;

use std::path::Path;

use ink_core::StoryGraph;
use tracing::debug;

/// Load a story file, or the built-in story when no path is given.
fn load_story(path: Option<&Path>) -> Result<StoryGraph, String> {
    let story = match path {
        Some(path) => StoryGraph::from_path(path),
        None => ink_core::builtin::midnight(),
    }
    .map_err(|e| e.to_string())?;
    debug!(
        title = %story.meta.title,
        scenes = story.len(),
        path = ?path,
        "story loaded"
    );
    Ok(story)
}

/// Print unreachable-scene warnings to stderr.
fn print_warnings(story: &StoryGraph) {
    let unreachable = story.unreachable();
    for id in &unreachable {
        eprintln!("  warning: scene \"{id}\" is unreachable");
    }
    if !unreachable.is_empty() {
        eprintln!(
            "  {} warning{}",
            unreachable.len(),
            if unreachable.len() == 1 { "" } else { "s" },
        );
    }
}

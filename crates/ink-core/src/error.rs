use std::fmt;
use std::path::PathBuf;

use crate::scene::SceneId;

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur when loading a story graph.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// The graph references scenes that do not exist or is otherwise malformed.
    #[error(transparent)]
    Integrity(#[from] GraphIntegrityError),

    /// The story source is not valid story JSON.
    #[error("invalid story data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The story file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Every integrity problem found in a story graph, reported together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("story graph failed integrity check:\n{}", render(.problems))]
pub struct GraphIntegrityError {
    /// The problems, in scene order.
    pub problems: Vec<IntegrityProblem>,
}

fn render(problems: &[IntegrityProblem]) -> String {
    problems
        .iter()
        .map(|p| format!("  - {p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A single integrity violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityProblem {
    /// The designated start scene does not exist.
    MissingStart(SceneId),
    /// A choice points at a scene that does not exist.
    DanglingChoice {
        /// Scene owning the choice.
        scene: SceneId,
        /// Label of the choice.
        choice: String,
        /// The missing target.
        target: SceneId,
    },
    /// The declared fallback scene does not exist.
    MissingFallback(SceneId),
    /// The declared timeout scene does not exist.
    MissingTimeout(SceneId),
    /// A scene requires an item but the story declares no fallback scene.
    GateWithoutFallback {
        /// The gated scene.
        scene: SceneId,
        /// The required item.
        item: String,
    },
    /// The fallback scene is itself gated, so a redirect could never settle.
    GatedFallback(SceneId),
    /// An ending that still lists choices.
    EndingWithChoices(SceneId),
    /// A non-ending scene without any choice.
    DeadEnd(SceneId),
}

impl fmt::Display for IntegrityProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart(id) => write!(f, "start scene \"{id}\" does not exist"),
            Self::DanglingChoice {
                scene,
                choice,
                target,
            } => write!(
                f,
                "scene \"{scene}\": choice \"{choice}\" leads to missing scene \"{target}\""
            ),
            Self::MissingFallback(id) => write!(f, "fallback scene \"{id}\" does not exist"),
            Self::MissingTimeout(id) => write!(f, "timeout scene \"{id}\" does not exist"),
            Self::GateWithoutFallback { scene, item } => write!(
                f,
                "scene \"{scene}\" requires item \"{item}\" but the story declares no fallback scene"
            ),
            Self::GatedFallback(id) => {
                write!(f, "fallback scene \"{id}\" must not require an item")
            }
            Self::EndingWithChoices(id) => write!(f, "ending \"{id}\" has choices"),
            Self::DeadEnd(id) => write!(f, "scene \"{id}\" is not an ending but has no choices"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_error_lists_every_problem() {
        let err = GraphIntegrityError {
            problems: vec![
                IntegrityProblem::MissingStart(SceneId::from("start")),
                IntegrityProblem::MissingFallback(SceneId::from("missing_item_fallback")),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("start scene \"start\" does not exist"));
        assert!(text.contains("fallback scene \"missing_item_fallback\" does not exist"));
        assert_eq!(text.lines().count(), 3);
    }
}

//! Error types for the scene interpreter.

use ink_core::{SceneId, StoryError};
use thiserror::Error;

/// Result type for interpreter operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while resolving scenes and applying choices.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested or redirect-target scene is not in the story graph.
    #[error("Scene \"{0}\" not found!")]
    SceneNotFound(SceneId),

    /// A choice was submitted before any scene was presented.
    #[error("no scene has been presented yet")]
    NoPresentation,

    /// The choice index is not among the presented choices.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// The choice is shown but its required item is missing.
    #[error("\"{label}\" requires {item}")]
    ChoiceUnavailable {
        /// Label of the rejected choice.
        label: String,
        /// The missing item.
        item: String,
    },

    /// The presented scene is an ending and offers no choices.
    #[error("scene \"{0}\" offers no choices")]
    TerminalScene(SceneId),

    /// Gated scenes kept redirecting without settling on a scene.
    #[error("redirect loop at scene \"{0}\"")]
    RedirectLoop(SceneId),

    /// Presenter I/O failed.
    #[error("presenter error: {0}")]
    Presenter(String),

    /// Story loading error.
    #[error(transparent)]
    Story(#[from] StoryError),
}

impl EngineError {
    /// Whether the error leaves the session usable, so the presenter can
    /// show a recovery screen instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Presenter(_) | Self::Story(_))
    }
}

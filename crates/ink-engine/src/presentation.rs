//! Resolved presentation descriptors handed to presenters.

use ink_core::SceneId;

/// Suffix appended to the label of a choice whose item is missing.
pub const MISSING_ITEM_SUFFIX: &str = "(Missing Item)";
/// Restart action offered after an ending.
pub const PLAY_AGAIN_LABEL: &str = "Play Again";
/// Restart action offered on the error screen.
pub const RESTART_LABEL: &str = "Restart Game";

/// Everything a presenter needs to render one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// The scene id the presenter asked for.
    pub requested: SceneId,
    /// The scene actually shown. Differs from `requested` after a gate redirect.
    pub scene: SceneId,
    /// Narrative text.
    pub text: String,
    /// What the player can do next.
    pub outcome: Outcome,
}

/// The interactive part of a presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A branching scene.
    Choices(Vec<ChoiceView>),
    /// A terminal scene.
    Ending {
        /// Achievement tag unlocked by reaching it.
        unlock_id: Option<String>,
    },
    /// The recovery screen shown after a resolution error.
    Failure {
        /// What went wrong.
        message: String,
    },
}

/// A choice as the player sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    /// Position in the scene's choice list.
    pub index: usize,
    /// Display label, suffixed when disabled.
    pub label: String,
    /// Whether the player may select it.
    pub enabled: bool,
    /// The gating item, if any.
    pub required_item: Option<String>,
}

impl ChoiceView {
    pub(crate) fn new(index: usize, text: &str, required_item: Option<&str>, enabled: bool) -> Self {
        let label = if enabled {
            text.to_string()
        } else {
            format!("{text} {MISSING_ITEM_SUFFIX}")
        };
        Self {
            index,
            label,
            enabled,
            required_item: required_item.map(str::to_string),
        }
    }
}

impl Presentation {
    /// Whether the player can only restart from here.
    pub fn is_terminal(&self) -> bool {
        !matches!(self.outcome, Outcome::Choices(_))
    }

    /// Whether a gate redirect substituted another scene.
    pub fn was_redirected(&self) -> bool {
        self.requested != self.scene
    }

    /// The listed choices, empty for terminal presentations.
    pub fn choices(&self) -> &[ChoiceView] {
        match &self.outcome {
            Outcome::Choices(choices) => choices,
            _ => &[],
        }
    }

    /// Label of the restart action, if this presentation offers one.
    pub fn restart_label(&self) -> Option<&'static str> {
        match self.outcome {
            Outcome::Choices(_) => None,
            Outcome::Ending { .. } => Some(PLAY_AGAIN_LABEL),
            Outcome::Failure { .. } => Some(RESTART_LABEL),
        }
    }
}

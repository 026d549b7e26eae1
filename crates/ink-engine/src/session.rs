//! The scene interpreter.

use std::collections::BTreeSet;
use std::sync::Arc;

use ink_core::{Scene, SceneId, StoryGraph};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::player::PlayerState;
use crate::presentation::{ChoiceView, Outcome, Presentation};

/// A single play-through of a story graph.
///
/// The session exclusively owns the player state and the current scene
/// pointer. The story graph is shared and never mutated.
#[derive(Debug, Clone)]
pub struct GameSession {
    story: Arc<StoryGraph>,
    config: EngineConfig,
    player: PlayerState,
    current: SceneId,
    presented: Option<Presentation>,
    unlocked: BTreeSet<String>,
}

impl GameSession {
    /// Create a session positioned at the story's start scene.
    pub fn new(story: Arc<StoryGraph>, config: EngineConfig) -> Self {
        let current = story.start().clone();
        Self {
            story,
            config,
            player: PlayerState::new(),
            current,
            presented: None,
            unlocked: BTreeSet::new(),
        }
    }

    /// The story being played.
    pub fn story(&self) -> &StoryGraph {
        &self.story
    }

    /// The session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of the player state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The scene the next [`current`](Self::current) call resolves.
    pub fn current_scene_id(&self) -> &SceneId {
        &self.current
    }

    /// The presentation whose choices [`apply_choice`](Self::apply_choice) accepts.
    pub fn presented(&self) -> Option<&Presentation> {
        self.presented.as_ref()
    }

    /// Achievement tags of every ending reached. Survives [`reset`](Self::reset).
    pub fn unlocked(&self) -> &BTreeSet<String> {
        &self.unlocked
    }

    /// Resolve the current scene.
    pub fn current(&mut self) -> EngineResult<Presentation> {
        let id = self.current.clone();
        self.resolve(id.as_str())
    }

    /// Resolve a scene into a presentation.
    ///
    /// A gated scene the player cannot enter is silently replaced by the
    /// story's fallback scene. Entering a scene adds its relationship effects
    /// every time, so resolving the same scene twice applies them twice.
    ///
    /// The current scene pointer is left alone: only a taken choice or a
    /// [`reset`](Self::reset) moves it, so [`current_scene_id`](Self::current_scene_id)
    /// may differ from the scene presented here.
    pub fn resolve(&mut self, id: &str) -> EngineResult<Presentation> {
        let story = Arc::clone(&self.story);
        let requested = SceneId::from(id);

        let (scene_id, scene) = self.settle(&story, requested.clone())?;

        if !scene.relationship_effects.is_empty() {
            debug!(scene = %scene_id, effects = ?scene.relationship_effects, "applying relationship effects");
            self.player.apply_relationship_effects(&scene.relationship_effects);
        }

        let outcome = if scene.is_ending {
            let fresh = scene
                .unlock_id
                .as_ref()
                .filter(|tag| !self.unlocked.contains(tag.as_str()));
            if let Some(tag) = fresh {
                info!(unlock = %tag, "achievement unlocked");
                self.unlocked.insert(tag.clone());
            }
            Outcome::Ending {
                unlock_id: scene.unlock_id.clone(),
            }
        } else {
            Outcome::Choices(self.choice_views(scene))
        };

        let presentation = Presentation {
            requested,
            scene: scene_id,
            text: scene.text.clone(),
            outcome,
        };
        self.presented = Some(presentation.clone());
        Ok(presentation)
    }

    /// Follow gate redirects until a scene the player may enter.
    fn settle<'a>(
        &self,
        story: &'a StoryGraph,
        requested: SceneId,
    ) -> EngineResult<(SceneId, &'a Scene)> {
        let mut target = requested;
        let mut visited = BTreeSet::new();

        loop {
            let Some(scene) = story.get(target.as_str()) else {
                warn!(scene = %target, "scene not found");
                return Err(EngineError::SceneNotFound(target));
            };

            let Some(item) = &scene.required_item else {
                return Ok((target, scene));
            };
            if self.player.has_item(item) {
                return Ok((target, scene));
            }

            let Some(fallback) = story.fallback() else {
                return Err(EngineError::RedirectLoop(target));
            };
            if !visited.insert(target.clone()) {
                return Err(EngineError::RedirectLoop(target));
            }
            debug!(from = %target, to = %fallback, item = %item, "gated scene redirected");
            target = fallback.clone();
        }
    }

    fn choice_views(&self, scene: &Scene) -> Vec<ChoiceView> {
        scene
            .choices()
            .iter()
            .enumerate()
            .map(|(index, choice)| {
                let enabled = choice
                    .required_item
                    .as_deref()
                    .is_none_or(|item| self.player.has_item(item));
                ChoiceView::new(index, &choice.text, choice.required_item.as_deref(), enabled)
            })
            .collect()
    }

    /// Take one of the most recently presented choices.
    ///
    /// Stat changes overwrite, then effects add, then the current scene moves
    /// to the choice's target (or to the timeout scene once time runs out).
    /// Rejected choices leave the session untouched.
    pub fn apply_choice(&mut self, index: usize) -> EngineResult<()> {
        let presented = self.presented.as_ref().ok_or(EngineError::NoPresentation)?;
        if presented.is_terminal() {
            return Err(EngineError::TerminalScene(presented.scene.clone()));
        }

        let story = Arc::clone(&self.story);
        let scene = story
            .get(presented.scene.as_str())
            .ok_or_else(|| EngineError::SceneNotFound(presented.scene.clone()))?;
        let Some(choice) = scene.choices().get(index) else {
            warn!(scene = %presented.scene, index, "choice out of range");
            return Err(EngineError::InvalidChoice(index));
        };

        let missing = choice
            .required_item
            .as_deref()
            .filter(|item| !self.player.has_item(item));
        if let Some(item) = missing {
            warn!(choice = %choice.text, item = %item, "disabled choice rejected");
            return Err(EngineError::ChoiceUnavailable {
                label: choice.text.clone(),
                item: item.to_string(),
            });
        }

        let policy = self.config.stat_policy;
        if let Some(change) = &choice.stat_change {
            self.player.apply_stat_change(change, policy);
        }
        if let Some(effects) = &choice.effects {
            self.player.apply_effects(effects, policy);
        }

        self.current = match story.timeout() {
            Some(timeout) if self.player.out_of_time() => {
                debug!(time_left = self.player.time_left, "time ran out");
                timeout.clone()
            }
            _ => choice.next.clone(),
        };
        debug!(choice = %choice.text, next = %self.current, "choice applied");

        self.presented = None;
        Ok(())
    }

    /// Take a choice and resolve the scene it leads to.
    pub fn choose(&mut self, index: usize) -> EngineResult<Presentation> {
        self.apply_choice(index)?;
        self.current()
    }

    /// Restore the player state and return to the start scene.
    pub fn reset(&mut self) {
        info!(start = %self.story.start(), "session reset");
        self.player.reset();
        self.current = self.story.start().clone();
        self.presented = None;
    }

    /// Build the error screen for a failed resolution. Its only action is a
    /// restart.
    pub fn recover(&mut self, err: &EngineError) -> Presentation {
        let scene = match err {
            EngineError::SceneNotFound(id) | EngineError::RedirectLoop(id) => id.clone(),
            _ => self.current.clone(),
        };
        let presentation = Presentation {
            requested: scene.clone(),
            scene,
            text: format!("ERROR: {err}"),
            outcome: Outcome::Failure {
                message: err.to_string(),
            },
        };
        self.presented = Some(presentation.clone());
        presentation
    }
}

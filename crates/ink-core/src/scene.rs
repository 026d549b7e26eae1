use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key of a scene in the story graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    /// Creates a scene identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SceneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for SceneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A node of the story graph: narrative text plus its outgoing choices.
///
/// A scene is either an ending (`is_ending`, no choices) or a branching
/// scene with at least one choice. The story graph rejects anything else.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scene {
    /// Text shown when the scene is entered.
    pub text: String,
    /// Outgoing choices, absent on endings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Terminal marker.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_ending: bool,
    /// Item the player must carry to enter; otherwise the story's fallback
    /// scene is shown in its place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_item: Option<String>,
    /// Additive relationship deltas applied each time the scene is entered.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationship_effects: BTreeMap<String, i64>,
    /// Achievement tag recorded when the scene is reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_id: Option<String>,
}

impl Scene {
    /// Create a branching scene with no choices yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Create a terminal scene.
    pub fn ending(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_ending: true,
            ..Self::default()
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.get_or_insert_with(Vec::new).push(choice);
        self
    }

    /// Gate entry on an inventory item.
    pub fn with_required_item(mut self, item: impl Into<String>) -> Self {
        self.required_item = Some(item.into());
        self
    }

    /// Add a relationship delta applied on entry.
    pub fn with_relationship_effect(mut self, character: impl Into<String>, delta: i64) -> Self {
        self.relationship_effects.insert(character.into(), delta);
        self
    }

    /// Set the achievement tag.
    pub fn with_unlock(mut self, unlock_id: impl Into<String>) -> Self {
        self.unlock_id = Some(unlock_id.into());
        self
    }

    /// The scene's choices, empty for endings.
    pub fn choices(&self) -> &[Choice] {
        self.choices.as_deref().unwrap_or(&[])
    }
}

/// An edge from one scene to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Choice {
    /// Label shown to the player.
    pub text: String,
    /// Target scene.
    pub next: SceneId,
    /// Literal values written over player stats when taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_change: Option<StatChange>,
    /// Deltas and inventory changes applied when taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<ChoiceEffects>,
    /// Item required to select this choice. A gated choice stays listed but
    /// disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_item: Option<String>,
}

impl Choice {
    /// Create a choice leading to `next`.
    pub fn new(text: impl Into<String>, next: impl Into<SceneId>) -> Self {
        Self {
            text: text.into(),
            next: next.into(),
            stat_change: None,
            effects: None,
            required_item: None,
        }
    }

    /// Set the stat overwrite.
    pub fn with_stat_change(mut self, stat_change: StatChange) -> Self {
        self.stat_change = Some(stat_change);
        self
    }

    /// Set the effects.
    pub fn with_effects(mut self, effects: ChoiceEffects) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Gate selection on an inventory item.
    pub fn with_required_item(mut self, item: impl Into<String>) -> Self {
        self.required_item = Some(item.into());
        self
    }
}

/// Overwrite of named player stats. Each present field replaces the
/// player's current value; nothing is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatChange {
    /// New value of the key flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_key: Option<bool>,
    /// New trust value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<i64>,
    /// New remaining time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_left: Option<i64>,
}

impl StatChange {
    /// Overwrite the key flag.
    pub fn has_key(value: bool) -> Self {
        Self {
            has_key: Some(value),
            ..Self::default()
        }
    }
}

/// Structured deltas applied when a choice is taken.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChoiceEffects {
    /// Time subtracted from `timeLeft`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_cost: Option<i64>,
    /// Signed delta added to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<i64>,
    /// Item added to the inventory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub give_item: Option<String>,
    /// Item removed from the inventory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_item: Option<String>,
}

impl ChoiceEffects {
    /// Effects that only cost time.
    pub fn time_cost(cost: i64) -> Self {
        Self {
            time_cost: Some(cost),
            ..Self::default()
        }
    }

    /// Effects that only grant an item.
    pub fn give_item(item: impl Into<String>) -> Self {
        Self {
            give_item: Some(item.into()),
            ..Self::default()
        }
    }
}

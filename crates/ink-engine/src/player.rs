//! Player state management.

use std::collections::{BTreeMap, BTreeSet};

use ink_core::{ChoiceEffects, StatChange};

use crate::config::StatPolicy;

/// Character whose relationship score starts at [`DEFAULT_RELATIONSHIP`].
pub const MYSTERIOUS_FIGURE: &str = "mysteriousFigure";
/// Character whose relationship score starts at [`DEFAULT_RELATIONSHIP`].
pub const HOUSE_SPIRIT: &str = "houseSpirit";
/// Initial relationship score.
pub const DEFAULT_RELATIONSHIP: i64 = 50;
/// Initial remaining time.
pub const DEFAULT_TIME_LEFT: i64 = 100;

/// The player's mutable state. Only the [`GameSession`](crate::GameSession)
/// writes to it; presenters read snapshots for their stats panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    /// Whether the player picked up the key.
    pub has_key: bool,
    /// Trust earned so far.
    pub trust: i64,
    /// Remaining time before midnight.
    pub time_left: i64,
    /// Relationship score per character id.
    pub relationships: BTreeMap<String, i64>,
    /// Items carried.
    pub inventory: BTreeSet<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            has_key: false,
            trust: 0,
            time_left: DEFAULT_TIME_LEFT,
            relationships: BTreeMap::from([
                (MYSTERIOUS_FIGURE.to_string(), DEFAULT_RELATIONSHIP),
                (HOUSE_SPIRIT.to_string(), DEFAULT_RELATIONSHIP),
            ]),
            inventory: BTreeSet::new(),
        }
    }
}

impl PlayerState {
    /// Create a player state with the starting defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every field to its starting default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if the player carries an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    /// Add an item to inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.insert(item.into());
    }

    /// Remove an item from inventory.
    pub fn remove_item(&mut self, item: &str) -> bool {
        self.inventory.remove(item)
    }

    /// Relationship score with a character.
    pub fn relationship(&self, character: &str) -> Option<i64> {
        self.relationships.get(character).copied()
    }

    /// Overwrite the named stats with the literal values of `change`.
    pub fn apply_stat_change(&mut self, change: &StatChange, policy: StatPolicy) {
        if let Some(has_key) = change.has_key {
            self.has_key = has_key;
        }
        if let Some(trust) = change.trust {
            self.trust = trust;
        }
        if let Some(time_left) = change.time_left {
            self.time_left = policy.time_left(time_left);
        }
    }

    /// Add relationship deltas. Characters without a score start from zero.
    /// Scores saturate at the bounds of `i64`.
    pub fn apply_relationship_effects(&mut self, effects: &BTreeMap<String, i64>) {
        for (character, delta) in effects {
            let score = self.relationships.entry(character.clone()).or_insert(0);
            *score = score.saturating_add(*delta);
        }
    }

    /// Apply the deltas and inventory changes of a taken choice.
    pub fn apply_effects(&mut self, effects: &ChoiceEffects, policy: StatPolicy) {
        if let Some(cost) = effects.time_cost {
            self.time_left = policy.time_left(self.time_left.saturating_sub(cost));
        }
        if let Some(delta) = effects.trust {
            self.trust = self.trust.saturating_add(delta);
        }
        if let Some(item) = &effects.give_item {
            self.add_item(item.clone());
        }
        if let Some(item) = &effects.take_item {
            self.remove_item(item);
        }
    }

    /// Whether the clock ran out.
    pub fn out_of_time(&self) -> bool {
        self.time_left <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_state_defaults() {
        let state = PlayerState::new();

        assert!(!state.has_key);
        assert_eq!(state.trust, 0);
        assert_eq!(state.time_left, 100);
        assert_eq!(state.relationship(MYSTERIOUS_FIGURE), Some(50));
        assert_eq!(state.relationship(HOUSE_SPIRIT), Some(50));
        assert!(state.inventory.is_empty());
    }

    #[test]
    fn inventory_management() {
        let mut state = PlayerState::new();

        assert!(!state.has_item("key"));
        state.add_item("key");
        assert!(state.has_item("key"));

        // Adding again should not duplicate
        state.add_item("key");
        assert_eq!(state.inventory.len(), 1);

        assert!(state.remove_item("key"));
        assert!(!state.has_item("key"));
        assert!(!state.remove_item("key"));
    }

    #[test]
    fn stat_change_overwrites() {
        let mut state = PlayerState::new();
        state.trust = 30;

        let change = StatChange {
            has_key: Some(true),
            trust: Some(5),
            time_left: None,
        };
        state.apply_stat_change(&change, StatPolicy::Clamp);
        state.apply_stat_change(&change, StatPolicy::Clamp);

        assert!(state.has_key);
        assert_eq!(state.trust, 5);
        assert_eq!(state.time_left, 100);
    }

    #[test]
    fn stat_change_respects_policy() {
        let mut state = PlayerState::new();
        let change = StatChange {
            time_left: Some(250),
            ..StatChange::default()
        };

        state.apply_stat_change(&change, StatPolicy::Clamp);
        assert_eq!(state.time_left, 100);

        state.apply_stat_change(&change, StatPolicy::Unclamped);
        assert_eq!(state.time_left, 250);
    }

    #[test]
    fn relationship_effects_accumulate() {
        let mut state = PlayerState::new();
        let effects = BTreeMap::from([
            (MYSTERIOUS_FIGURE.to_string(), 5),
            ("butler".to_string(), -3),
        ]);

        state.apply_relationship_effects(&effects);
        state.apply_relationship_effects(&effects);

        assert_eq!(state.relationship(MYSTERIOUS_FIGURE), Some(60));
        assert_eq!(state.relationship("butler"), Some(-6));
        assert_eq!(state.relationship(HOUSE_SPIRIT), Some(50));
    }

    #[test]
    fn effects_apply_deltas_and_items() {
        let mut state = PlayerState::new();
        state.add_item("candle");

        let effects = ChoiceEffects {
            time_cost: Some(20),
            trust: Some(-4),
            give_item: Some("map".to_string()),
            take_item: Some("candle".to_string()),
        };
        state.apply_effects(&effects, StatPolicy::Clamp);

        assert_eq!(state.time_left, 80);
        assert_eq!(state.trust, -4);
        assert!(state.has_item("map"));
        assert!(!state.has_item("candle"));
    }

    #[test]
    fn time_cost_clamps_at_zero() {
        let mut state = PlayerState::new();
        state.apply_effects(&ChoiceEffects::time_cost(130), StatPolicy::Clamp);
        assert_eq!(state.time_left, 0);
        assert!(state.out_of_time());

        let mut state = PlayerState::new();
        state.apply_effects(&ChoiceEffects::time_cost(130), StatPolicy::Unclamped);
        assert_eq!(state.time_left, -30);
        assert!(state.out_of_time());
    }

    #[test]
    fn additive_stats_saturate() {
        let mut state = PlayerState::new();
        let generous = ChoiceEffects {
            trust: Some(i64::MAX),
            ..ChoiceEffects::default()
        };
        state.apply_effects(&generous, StatPolicy::Clamp);
        state.apply_effects(&generous, StatPolicy::Clamp);
        assert_eq!(state.trust, i64::MAX);

        let devoted = BTreeMap::from([(HOUSE_SPIRIT.to_string(), i64::MAX)]);
        state.apply_relationship_effects(&devoted);
        state.apply_relationship_effects(&devoted);
        assert_eq!(state.relationship(HOUSE_SPIRIT), Some(i64::MAX));

        let spiteful = BTreeMap::from([(MYSTERIOUS_FIGURE.to_string(), i64::MIN)]);
        state.apply_relationship_effects(&spiteful);
        state.apply_relationship_effects(&spiteful);
        assert_eq!(state.relationship(MYSTERIOUS_FIGURE), Some(i64::MIN));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = PlayerState::new();
        state.has_key = true;
        state.trust = 42;
        state.time_left = -7;
        state.add_item("key");
        state.apply_relationship_effects(&BTreeMap::from([(HOUSE_SPIRIT.to_string(), 9)]));

        state.reset();

        assert_eq!(state, PlayerState::default());
    }
}

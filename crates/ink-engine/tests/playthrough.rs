//! Random play-throughs of the built-in story.

use std::sync::Arc;

use ink_core::StoryGraph;
use ink_engine::{EngineConfig, EngineError, GameSession, PlayerState};
use proptest::prelude::*;

fn story() -> Arc<StoryGraph> {
    Arc::new(ink_core::builtin::midnight().unwrap())
}

#[test]
fn every_reachable_scene_resolves() {
    let story = story();
    let mut session = GameSession::new(Arc::clone(&story), EngineConfig::default());

    for id in story.reachable() {
        let presentation = session.resolve(id.as_str()).unwrap();
        assert!(story.contains(presentation.scene.as_str()));
    }
}

proptest! {
    #[test]
    fn random_walks_never_strand_the_player(picks in prop::collection::vec(0usize..4, 1..40)) {
        let story = story();
        let mut session = GameSession::new(story, EngineConfig::default());
        let mut presentation = session.current().unwrap();

        for pick in picks {
            if presentation.is_terminal() {
                prop_assert!(session.apply_choice(pick).is_err());
                session.reset();
                presentation = session.current().unwrap();
                continue;
            }

            let before = session.player().clone();
            match session.apply_choice(pick) {
                Ok(()) => {
                    presentation = session.current().unwrap();
                }
                Err(EngineError::InvalidChoice(_)) => {
                    prop_assert!(pick >= presentation.choices().len());
                    prop_assert_eq!(session.player(), &before);
                }
                Err(EngineError::ChoiceUnavailable { .. }) => {
                    prop_assert!(!presentation.choices()[pick].enabled);
                    prop_assert_eq!(session.player(), &before);
                }
                Err(other) => {
                    return Err(TestCaseError::fail(format!("unexpected error: {other}")));
                }
            }

            let time_left = session.player().time_left;
            prop_assert!((0..=100).contains(&time_left));
        }
    }

    #[test]
    fn reset_always_restores_defaults(picks in prop::collection::vec(0usize..3, 0..20)) {
        let mut session = GameSession::new(story(), EngineConfig::default());
        session.current().unwrap();
        for pick in picks {
            if session.choose(pick).is_err() {
                break;
            }
        }

        session.reset();

        prop_assert_eq!(session.player(), &PlayerState::default());
        prop_assert_eq!(session.current_scene_id(), session.story().start());
    }
}

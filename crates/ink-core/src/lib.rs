//! Core types for Inkline: scenes, choices, and the story graph.
//!
//! A [`StoryGraph`] is immutable once constructed. Every constructor runs the
//! integrity check, so a graph that exists can never strand the player on a
//! dangling scene reference. Graphs are built programmatically with the
//! [`Scene`]/[`Choice`] builders or deserialized from JSON.

/// The shipped "Escape Before Midnight" story.
pub mod builtin;
/// Error types used throughout the crate.
pub mod error;
/// Scene, choice, and stat-change schema.
pub mod scene;
/// The validated story graph.
pub mod story;

/// Re-export error types.
pub use error::{GraphIntegrityError, IntegrityProblem, StoryError, StoryResult};
/// Re-export schema types.
pub use scene::{Choice, ChoiceEffects, Scene, SceneId, StatChange};
/// Re-export story graph types.
pub use story::{StoryGraph, StoryMeta};

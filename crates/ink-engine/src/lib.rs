//! Scene interpreter for Inkline.
//!
//! A [`GameSession`] owns the [`PlayerState`] and the current scene pointer.
//! A [`Presenter`] drives it: it asks for a [`Presentation`], renders it, and
//! feeds the player's [`Action`] back until an ending is reached. The session
//! never blocks; reveal pacing lives with the presenter through a
//! [`RevealScheduler`].

/// Engine configuration.
pub mod config;
/// Presenter capability and the game loop.
pub mod driver;
/// Error types for the interpreter.
pub mod error;
/// Player state management.
pub mod player;
/// Resolved presentation descriptors.
pub mod presentation;
/// Cancellable typewriter reveal schedule.
pub mod reveal;
/// The scene interpreter.
pub mod session;

pub use config::{EngineConfig, RevealConfig, StatPolicy};
pub use driver::{Action, Presenter, RunSummary, run, run_from};
pub use error::{EngineError, EngineResult};
pub use player::PlayerState;
pub use presentation::{ChoiceView, Outcome, Presentation};
pub use reveal::{Reveal, RevealFrame, RevealScheduler, RevealTicket};
pub use session::GameSession;

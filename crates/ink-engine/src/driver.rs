//! Presenter capability and the game loop that connects it to a session.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::player::PlayerState;
use crate::presentation::{Outcome, Presentation};
use crate::session::GameSession;

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Take the choice at this index.
    Choose(usize),
    /// Reset the session and start over.
    Restart,
    /// Stop playing.
    Quit,
}

/// Renders presentations and collects the player's actions.
///
/// Presenters only read the player state; every mutation goes through the
/// session.
pub trait Presenter {
    /// Render a presentation along with the current stats.
    fn present(&mut self, presentation: &Presentation, player: &PlayerState) -> EngineResult<()>;

    /// Wait for the player's next action on `presentation`.
    fn next_action(&mut self, presentation: &Presentation) -> EngineResult<Action>;

    /// Tell the player a submitted choice was refused. The same presentation
    /// stays active afterwards.
    fn reject(&mut self, _err: &EngineError) -> EngineResult<()> {
        Ok(())
    }
}

/// Statistics of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Endings presented, counting repeats.
    pub endings_reached: usize,
    /// Times the player restarted.
    pub restarts: usize,
    /// Achievement tags unlocked during the run.
    pub unlocked: BTreeSet<String>,
}

/// Drive `session` with `presenter` until the player quits.
///
/// Resolution failures become the session's recovery screen; refused choices
/// are reported through [`Presenter::reject`] and the player chooses again.
pub fn run<P>(session: &mut GameSession, presenter: &mut P) -> EngineResult<RunSummary>
where
    P: Presenter + ?Sized,
{
    let entry = session.current_scene_id().clone();
    run_from(session, presenter, entry.as_str())
}

/// Like [`run`], but open on `entry` instead of the current scene.
pub fn run_from<P>(
    session: &mut GameSession,
    presenter: &mut P,
    entry: &str,
) -> EngineResult<RunSummary>
where
    P: Presenter + ?Sized,
{
    let mut summary = RunSummary::default();
    let mut presentation = recovering(session, |s| s.resolve(entry))?;

    loop {
        presenter.present(&presentation, session.player())?;
        if matches!(presentation.outcome, Outcome::Ending { .. }) {
            summary.endings_reached += 1;
        }

        loop {
            match presenter.next_action(&presentation)? {
                Action::Quit => {
                    debug!(?summary, "player quit");
                    summary.unlocked = session.unlocked().clone();
                    return Ok(summary);
                }
                Action::Restart => {
                    session.reset();
                    summary.restarts += 1;
                    break;
                }
                Action::Choose(index) => match session.apply_choice(index) {
                    Ok(()) => break,
                    Err(err) if err.is_recoverable() => presenter.reject(&err)?,
                    Err(err) => return Err(err),
                },
            }
        }

        presentation = recovering(session, GameSession::current)?;
    }
}

fn recovering<F>(session: &mut GameSession, resolve: F) -> EngineResult<Presentation>
where
    F: FnOnce(&mut GameSession) -> EngineResult<Presentation>,
{
    match resolve(session) {
        Ok(presentation) => Ok(presentation),
        Err(err) if err.is_recoverable() => Ok(session.recover(&err)),
        Err(err) => Err(err),
    }
}

//! Line-based terminal presenter with typewriter reveal.

use std::io::{self, BufRead, Write};
use std::thread;

use colored::Colorize;
use ink_engine::{
    Action, EngineError, EngineResult, Outcome, PlayerState, Presentation, Presenter,
    RevealConfig, RevealScheduler, RevealTicket,
};

/// Renders presentations to `output` and reads actions from `input`.
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    scheduler: RevealScheduler,
    reveal: RevealConfig,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W, reveal: RevealConfig) -> Self {
        Self {
            input,
            output,
            scheduler: RevealScheduler::new(),
            reveal,
        }
    }

    #[cfg(test)]
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// Reveal `text` and return the ticket of that reveal.
    fn type_out(&mut self, text: &str) -> io::Result<RevealTicket> {
        let mut reveal = self.scheduler.schedule(text, &self.reveal);
        write!(self.output, "\n  ")?;
        for frame in &mut reveal {
            write!(self.output, "{}", frame.ch)?;
            if !frame.delay.is_zero() {
                self.output.flush()?;
                thread::sleep(frame.delay);
            }
        }
        writeln!(self.output)?;
        writeln!(self.output)?;
        Ok(reveal.ticket())
    }

    fn render_stats(&mut self, player: &PlayerState) -> io::Result<()> {
        let key = if player.has_key {
            "yes".green()
        } else {
            "no".red()
        };
        let relationships = player
            .relationships
            .iter()
            .map(|(who, score)| format!("{who} {score}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            self.output,
            "  {} Key: {key}  Trust: {}  Time: {}  ({relationships})",
            "│".dimmed(),
            player.trust,
            player.time_left,
        )
    }
}

fn render_actions<W: Write>(output: &mut W, presentation: &Presentation) -> io::Result<()> {
    match &presentation.outcome {
        Outcome::Choices(choices) => {
            for choice in choices {
                let line = format!("  [{}] {}", choice.index + 1, choice.label);
                if choice.enabled {
                    writeln!(output, "{line}")?;
                } else {
                    writeln!(output, "{}", line.dimmed())?;
                }
            }
        }
        Outcome::Ending { unlock_id } => {
            if let Some(tag) = unlock_id {
                writeln!(output, "  {} {}", "Unlocked:".green().bold(), tag)?;
            }
        }
        Outcome::Failure { .. } => {}
    }
    if let Some(label) = presentation.restart_label() {
        writeln!(output, "  [r] {label}")?;
        writeln!(output, "  [q] Quit")?;
    }
    Ok(())
}

fn presenter_error(err: io::Error) -> EngineError {
    EngineError::Presenter(err.to_string())
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn present(&mut self, presentation: &Presentation, player: &PlayerState) -> EngineResult<()> {
        if matches!(presentation.outcome, Outcome::Failure { .. }) {
            self.scheduler.cancel();
            writeln!(self.output, "\n  {}\n", presentation.text.red().bold())
                .map_err(presenter_error)?;
            render_actions(&mut self.output, presentation).map_err(presenter_error)?;
        } else {
            // Choices appear once the reveal completes, unless it went stale.
            let ticket = self.type_out(&presentation.text).map_err(presenter_error)?;
            let output = &mut self.output;
            let mut rendered = Ok(());
            self.scheduler.complete(ticket, || {
                rendered = render_actions(output, presentation);
            });
            rendered.map_err(presenter_error)?;
        }
        self.render_stats(player).map_err(presenter_error)
    }

    fn next_action(&mut self, presentation: &Presentation) -> EngineResult<Action> {
        loop {
            write!(self.output, "> ").map_err(presenter_error)?;
            self.output.flush().map_err(presenter_error)?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(presenter_error)?;
            if read == 0 {
                writeln!(self.output).map_err(presenter_error)?;
                return Ok(Action::Quit);
            }

            if let Some(action) = parse_action(line.trim()) {
                return Ok(action);
            }

            let hint = if presentation.is_terminal() {
                "Type r to restart or q to quit."
            } else {
                "Type a choice number, r to restart, or q to quit."
            };
            writeln!(self.output, "  {}", hint.yellow()).map_err(presenter_error)?;
        }
    }

    fn reject(&mut self, err: &EngineError) -> EngineResult<()> {
        writeln!(self.output, "  {}", err.to_string().yellow()).map_err(presenter_error)
    }
}

/// Parse a line of player input. Choice numbers are 1-based.
fn parse_action(input: &str) -> Option<Action> {
    match input.to_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(Action::Quit),
        "r" | "restart" => Some(Action::Restart),
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => Some(Action::Choose(n - 1)),
            _ => None,
        },
    }
}

//! Cancellable typewriter reveal schedule.
//!
//! A presenter reveals scene text one character at a time. Each reveal is
//! tied to a [`RevealTicket`]; scheduling a new reveal (or cancelling)
//! invalidates every older ticket, so a completion callback belonging to a
//! stale scene never fires.

use std::time::Duration;

use crate::config::RevealConfig;

/// Identifies one scheduled reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevealTicket(u64);

/// Issues reveals and tracks which one is live.
#[derive(Debug, Default)]
pub struct RevealScheduler {
    generation: u64,
}

impl RevealScheduler {
    /// Create a scheduler with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a reveal of `text`, invalidating any reveal still in flight.
    pub fn schedule(&mut self, text: impl Into<String>, config: &RevealConfig) -> Reveal {
        self.generation += 1;
        let delay = if config.enabled {
            Duration::from_millis(config.ms_per_char)
        } else {
            Duration::ZERO
        };
        Reveal {
            ticket: RevealTicket(self.generation),
            text: text.into(),
            offset: 0,
            delay,
        }
    }

    /// Invalidate every reveal in flight.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Whether `ticket` belongs to the live reveal.
    pub fn is_current(&self, ticket: RevealTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Run the completion callback of a reveal, unless a newer reveal or a
    /// cancellation superseded it. Returns whether `on_complete` ran.
    pub fn complete(&self, ticket: RevealTicket, on_complete: impl FnOnce()) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        on_complete();
        true
    }
}

/// One step of a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFrame {
    /// The character revealed by this step.
    pub ch: char,
    /// Byte length of the text visible after this step.
    pub shown: usize,
    /// Pause before the next step.
    pub delay: Duration,
}

/// A scheduled reveal: an iterator of frames, one per character.
#[derive(Debug, Clone)]
pub struct Reveal {
    ticket: RevealTicket,
    text: String,
    offset: usize,
    delay: Duration,
}

impl Reveal {
    /// The ticket to check against the scheduler.
    pub fn ticket(&self) -> RevealTicket {
        self.ticket
    }

    /// The full text being revealed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The part revealed so far.
    pub fn visible(&self) -> &str {
        &self.text[..self.offset]
    }

    /// Whether every character has been revealed.
    pub fn is_done(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// Reveal the rest at once, returning what had not been shown yet.
    pub fn finish(&mut self) -> &str {
        let start = self.offset;
        self.offset = self.text.len();
        &self.text[start..]
    }
}

impl Iterator for Reveal {
    type Item = RevealFrame;

    fn next(&mut self) -> Option<RevealFrame> {
        let ch = self.text[self.offset..].chars().next()?;
        self.offset += ch.len_utf8();
        Some(RevealFrame {
            ch,
            shown: self.offset,
            delay: self.delay,
        })
    }
}

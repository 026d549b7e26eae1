//! Configuration for a game session.

/// Lower bound of the `timeLeft` counter under [`StatPolicy::Clamp`].
pub const TIME_MIN: i64 = 0;
/// Upper bound of the `timeLeft` counter under [`StatPolicy::Clamp`].
pub const TIME_MAX: i64 = 100;

/// How numeric stats are kept in range after a choice mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatPolicy {
    /// Clamp `timeLeft` into `TIME_MIN..=TIME_MAX`.
    #[default]
    Clamp,
    /// Store whatever the arithmetic produces.
    Unclamped,
}

impl StatPolicy {
    /// Apply the policy to a `timeLeft` value.
    pub fn time_left(self, value: i64) -> i64 {
        match self {
            Self::Clamp => value.clamp(TIME_MIN, TIME_MAX),
            Self::Unclamped => value,
        }
    }
}

/// Typewriter reveal pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    /// Delay between two revealed characters.
    pub ms_per_char: u64,
    /// When false, text appears at once.
    pub enabled: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            ms_per_char: 30,
            enabled: true,
        }
    }
}

/// Configuration for a game session.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Range policy for numeric stats.
    pub stat_policy: StatPolicy,
    /// Reveal pacing handed to presenters.
    pub reveal: RevealConfig,
}

impl EngineConfig {
    /// Set the stat policy.
    pub fn with_stat_policy(mut self, policy: StatPolicy) -> Self {
        self.stat_policy = policy;
        self
    }

    /// Set the reveal delay per character.
    pub fn with_reveal_speed(mut self, ms_per_char: u64) -> Self {
        self.reveal.ms_per_char = ms_per_char;
        self
    }

    /// Show text instantly instead of revealing it.
    pub fn instant(mut self) -> Self {
        self.reveal.enabled = false;
        self
    }
}

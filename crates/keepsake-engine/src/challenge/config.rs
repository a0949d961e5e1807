use serde::{Deserialize, Serialize};

use crate::route::Route;

/// What a submission has to equal to be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Answer {
    /// Case-insensitive match against a fixed secret.
    Exact(String),
    /// Any non-blank submission (the name prompt).
    AnyNonEmpty,
}

impl Answer {
    /// Compare an already-trimmed guess.
    pub fn matches(&self, guess: &str) -> bool {
        match self {
            Answer::Exact(secret) => guess.to_lowercase() == secret.trim().to_lowercase(),
            Answer::AnyNonEmpty => !guess.is_empty(),
        }
    }
}

/// Delays of the challenge flow, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Mount → input focus.
    pub focus_delay: u32,
    /// Length of the rejected/shaking window.
    pub shake: u32,
    /// Accepted → question card starts fading out.
    pub fade_out_delay: u32,
    /// Fade out → success card mounted at zero opacity.
    pub mount_card_delay: u32,
    /// Mounted → success card animates to full opacity.
    pub show_card_delay: u32,
    /// Continue → navigation (the card's exit transition).
    pub exit_delay: u32,
    /// Duration of card fades.
    pub fade_duration: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            focus_delay: 120,
            shake: 600,
            fade_out_delay: 150,
            mount_card_delay: 250,
            show_card_delay: 20,
            exit_delay: 300,
            fade_duration: 600,
        }
    }
}

impl TimingConfig {
    pub fn fade_seconds(&self) -> f32 {
        self.fade_duration as f32 / 1000.0
    }

    pub fn exit_seconds(&self) -> f32 {
        self.exit_delay as f32 / 1000.0
    }
}

/// Everything that distinguishes one challenge page from another.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeConfig {
    pub answer: Answer,
    pub next_route: Route,
    pub timing: TimingConfig,
}

impl ChallengeConfig {
    pub fn new(answer: Answer, next_route: Route) -> Self {
        Self {
            answer,
            next_route,
            timing: TimingConfig::default(),
        }
    }

    /// Shorthand for a fixed secret.
    pub fn secret(secret: impl Into<String>, next_route: Route) -> Self {
        Self::new(Answer::Exact(secret.into()), next_route)
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }
}

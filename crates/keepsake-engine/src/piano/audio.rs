use thiserror::Error;

use super::pitch::Pitch;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("samples are still loading")]
    NotLoaded,
    /// Usually the autoplay policy: audio needs a user gesture first.
    #[error("audio blocked: {0}")]
    Blocked(String),
    #[error("audio engine already disposed")]
    Disposed,
}

/// What the piano needs from an instrument sampler.
///
/// Every call is best effort. Callers decide what a failure means; the
/// matcher logs it and keeps going.
pub trait AudioEngine {
    /// All samples fetched and decoded.
    fn is_loaded(&self) -> bool;

    /// Resume the audio context. Needs a user gesture in browsers.
    fn try_start(&mut self) -> Result<(), AudioError>;

    fn try_attack(&mut self, pitch: Pitch) -> Result<(), AudioError>;

    fn try_release(&mut self, pitch: Pitch) -> Result<(), AudioError>;

    /// Play `pitch` for `duration` seconds.
    fn try_attack_release(&mut self, pitch: Pitch, duration: f32) -> Result<(), AudioError>;

    /// Free the sampler. Every later call fails with `Disposed`.
    fn dispose(&mut self);
}

/// Tracks failures so the "tap to enable audio" notice is raised once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioStatus {
    blocked_seen: bool,
    failures: u32,
}

impl AudioStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of an audio call. Returns true the first time the
    /// engine reports it is blocked.
    pub fn record(&mut self, result: Result<(), AudioError>) -> bool {
        match result {
            Ok(()) => false,
            Err(err) => {
                self.failures += 1;
                log::debug!("audio call failed (ignored): {}", err);
                if matches!(err, AudioError::Blocked(_)) && !self.blocked_seen {
                    self.blocked_seen = true;
                    return true;
                }
                false
            }
        }
    }

    pub fn blocked_seen(&self) -> bool {
        self.blocked_seen
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

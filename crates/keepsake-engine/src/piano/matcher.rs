use serde::{Deserialize, Serialize};

use crate::core::scheduler::{Scheduler, Step};
use super::audio::{AudioEngine, AudioStatus};
use super::pitch::{MatchMode, Pitch};

/// Delays of the piano game, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PianoTiming {
    /// How long a wrong note stays on screen before the run resets.
    pub mismatch_display: u32,
    /// Completed run → first replayed note.
    pub win_delay: u32,
    /// Gap between replayed notes.
    pub replay_interval: u32,
    /// Length of each replayed note.
    pub note_duration: u32,
    /// Fade-out of the keyboard before the message appears.
    pub content_fade: u32,
}

impl Default for PianoTiming {
    fn default() -> Self {
        Self {
            mismatch_display: 800,
            win_delay: 500,
            replay_interval: 500,
            note_duration: 400,
            content_fade: 700,
        }
    }
}

impl PianoTiming {
    pub fn note_seconds(&self) -> f32 {
        self.note_duration as f32 / 1000.0
    }

    pub fn content_fade_seconds(&self) -> f32 {
        self.content_fade as f32 / 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequencePhase {
    /// Samples not loaded; presses are ignored.
    Loading,
    Ready,
    /// A wrong note is on display.
    Mismatch,
    /// Run complete; the target is being replayed. Input locked.
    PlayingBack,
    /// Terminal.
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPhase {
    InProgress,
    Correct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Loading or locked: no sound, no state change.
    Ignored,
    /// Sounded, but a mismatch is still on display.
    SoundOnly,
    Matched,
    Mismatched,
    /// Last note of the target; the win sequence is scheduled.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherEvent {
    Ready,
    Matched(Pitch),
    Mismatched(Pitch),
    /// Wrong-note display elapsed; played notes cleared.
    Reset,
    Completed,
    Highlight(Option<Pitch>),
    ContentFading,
    Won,
    /// First blocked audio call; show the "tap to enable audio" notice.
    AudioBlocked,
    HintChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ClearMismatch,
    Replay(Pitch),
    FadeContent,
    Reveal,
}

/// Tracks presses against a fixed target and runs the replay-then-win
/// sequence once the whole target has been played.
pub struct SequenceMatcher {
    target: Vec<Pitch>,
    played: Vec<Pitch>,
    mode: MatchMode,
    timing: PianoTiming,
    phase: SequencePhase,
    match_phase: MatchPhase,
    hint_visible: bool,
    highlighted: Option<Pitch>,
    audio_status: AudioStatus,
    timers: Scheduler<Action>,
    win_scheduled: bool,
    events: Vec<MatcherEvent>,
}

impl SequenceMatcher {
    pub fn new(target: Vec<Pitch>) -> Self {
        Self {
            target,
            played: Vec::new(),
            mode: MatchMode::default(),
            timing: PianoTiming::default(),
            phase: SequencePhase::Loading,
            match_phase: MatchPhase::InProgress,
            hint_visible: false,
            highlighted: None,
            audio_status: AudioStatus::new(),
            timers: Scheduler::new(),
            win_scheduled: false,
            events: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timing(mut self, timing: PianoTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn set_timing(&mut self, timing: PianoTiming) {
        self.timing = timing;
    }

    /// Samples finished loading.
    pub fn on_audio_ready(&mut self) {
        if self.phase == SequencePhase::Loading {
            self.phase = SequencePhase::Ready;
            log::info!("piano ready, {} notes to find", self.target.len());
            self.events.push(MatcherEvent::Ready);
        }
    }

    pub fn on_key_press<A: AudioEngine + ?Sized>(&mut self, pitch: Pitch, audio: &mut A) -> PressOutcome {
        if self.is_locked() {
            return PressOutcome::Ignored;
        }

        // Sound first; correctness never gates it and failures never stop play.
        let result = audio.try_start().and_then(|_| audio.try_attack(pitch));
        if self.audio_status.record(result) {
            self.events.push(MatcherEvent::AudioBlocked);
        }

        if self.phase == SequencePhase::Mismatch {
            return PressOutcome::SoundOnly;
        }
        let Some(&expected) = self.target.get(self.played.len()) else {
            return PressOutcome::SoundOnly;
        };

        self.played.push(pitch);
        if pitch.matches(expected, self.mode) {
            self.events.push(MatcherEvent::Matched(pitch));
            if self.played.len() == self.target.len() {
                self.complete();
                return PressOutcome::Completed;
            }
            PressOutcome::Matched
        } else {
            log::debug!("expected {}, got {}", expected, pitch);
            self.phase = SequencePhase::Mismatch;
            self.events.push(MatcherEvent::Mismatched(pitch));
            self.timers
                .after_ms(self.timing.mismatch_display, Action::ClearMismatch);
            PressOutcome::Mismatched
        }
    }

    pub fn on_key_release<A: AudioEngine + ?Sized>(&mut self, pitch: Pitch, audio: &mut A) {
        if self.is_locked() {
            return;
        }
        if self.audio_status.record(audio.try_release(pitch)) {
            self.events.push(MatcherEvent::AudioBlocked);
        }
    }

    /// Flip the letter overlay. Returns false when the toggle is locked.
    pub fn toggle_hint(&mut self) -> bool {
        if matches!(self.phase, SequencePhase::PlayingBack | SequencePhase::Won) {
            return false;
        }
        self.hint_visible = !self.hint_visible;
        self.events.push(MatcherEvent::HintChanged(self.hint_visible));
        true
    }

    /// Advance timers by `dt` seconds. Replayed notes go through `audio`.
    pub fn tick<A: AudioEngine + ?Sized>(&mut self, dt: f32, audio: &mut A) {
        for action in self.timers.tick(dt) {
            self.apply(action, audio);
        }
    }

    /// Cancel everything pending and release the sampler.
    pub fn teardown<A: AudioEngine + ?Sized>(&mut self, audio: &mut A) {
        self.timers.cancel_all();
        audio.dispose();
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = MatcherEvent> + '_ {
        self.events.drain(..)
    }

    pub fn target(&self) -> &[Pitch] {
        &self.target
    }

    pub fn played(&self) -> &[Pitch] {
        &self.played
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn timing(&self) -> &PianoTiming {
        &self.timing
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    pub fn match_phase(&self) -> MatchPhase {
        self.match_phase
    }

    pub fn audio_ready(&self) -> bool {
        self.phase != SequencePhase::Loading
    }

    pub fn is_playing_back(&self) -> bool {
        self.phase == SequencePhase::PlayingBack
    }

    pub fn is_error(&self) -> bool {
        self.phase == SequencePhase::Mismatch
    }

    pub fn is_won(&self) -> bool {
        self.phase == SequencePhase::Won
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Note currently lit by the replay.
    pub fn highlighted(&self) -> Option<Pitch> {
        self.highlighted
    }

    pub fn audio_status(&self) -> &AudioStatus {
        &self.audio_status
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Loading, replaying or won: presses and releases are ignored.
    pub fn is_locked(&self) -> bool {
        matches!(
            self.phase,
            SequencePhase::Loading | SequencePhase::PlayingBack | SequencePhase::Won
        )
    }

    fn complete(&mut self) {
        if self.win_scheduled {
            return;
        }
        self.win_scheduled = true;
        self.match_phase = MatchPhase::Correct;
        self.phase = SequencePhase::PlayingBack;
        if self.hint_visible {
            self.hint_visible = false;
            self.events.push(MatcherEvent::HintChanged(false));
        }
        self.events.push(MatcherEvent::Completed);
        log::info!("sequence complete, replaying");

        let timing = self.timing;
        let mut steps = Vec::with_capacity(self.target.len() + 2);
        for (i, &pitch) in self.target.iter().enumerate() {
            let delay = if i == 0 { timing.win_delay } else { timing.replay_interval };
            steps.push(Step::after_ms(delay, Action::Replay(pitch)));
        }
        steps.push(Step::after_ms(timing.replay_interval, Action::FadeContent));
        steps.push(Step::after_ms(timing.content_fade, Action::Reveal));
        self.timers.schedule(steps);
    }

    fn apply<A: AudioEngine + ?Sized>(&mut self, action: Action, audio: &mut A) {
        match action {
            Action::ClearMismatch => {
                if self.phase == SequencePhase::Mismatch {
                    self.played.clear();
                    self.phase = SequencePhase::Ready;
                    self.events.push(MatcherEvent::Reset);
                }
            }
            Action::Replay(pitch) => {
                let result = audio.try_attack_release(pitch, self.timing.note_seconds());
                if self.audio_status.record(result) {
                    self.events.push(MatcherEvent::AudioBlocked);
                }
                self.set_highlight(Some(pitch));
            }
            Action::FadeContent => {
                self.set_highlight(None);
                self.events.push(MatcherEvent::ContentFading);
            }
            Action::Reveal => {
                self.phase = SequencePhase::Won;
                log::info!("piano won");
                self.events.push(MatcherEvent::Won);
            }
        }
    }

    fn set_highlight(&mut self, pitch: Option<Pitch>) {
        if self.highlighted != pitch {
            self.highlighted = pitch;
            self.events.push(MatcherEvent::Highlight(pitch));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piano::audio::recording::{Call, RecordingAudio};

    const DT: f32 = 1.0 / 60.0;

    fn cabbage() -> Vec<Pitch> {
        Pitch::parse_sequence("C4 A4 B4 B4 A4 G4 E4").unwrap()
    }

    fn ready() -> (SequenceMatcher, RecordingAudio) {
        let mut m = SequenceMatcher::new(cabbage());
        m.on_audio_ready();
        m.drain_events().for_each(drop);
        (m, RecordingAudio::loaded())
    }

    fn press_all(m: &mut SequenceMatcher, audio: &mut RecordingAudio, names: &str) -> Vec<PressOutcome> {
        Pitch::parse_sequence(names)
            .unwrap()
            .into_iter()
            .map(|p| m.on_key_press(p, audio))
            .collect()
    }

    fn advance(m: &mut SequenceMatcher, audio: &mut RecordingAudio, ms: u32) {
        let mut remaining = ms as f32 / 1000.0;
        while remaining > 0.0 {
            let step = remaining.min(DT);
            m.tick(step, audio);
            remaining -= step;
        }
    }

    #[test]
    fn presses_are_ignored_while_loading() {
        let mut m = SequenceMatcher::new(cabbage());
        let mut audio = RecordingAudio::default();
        assert_eq!(m.on_key_press(Pitch(60), &mut audio), PressOutcome::Ignored);
        m.on_key_release(Pitch(60), &mut audio);
        assert!(audio.calls.is_empty());
        assert!(m.played().is_empty());
        assert!(!m.audio_ready());

        m.on_audio_ready();
        assert_eq!(m.phase(), SequencePhase::Ready);
        assert_eq!(m.drain_events().collect::<Vec<_>>(), vec![MatcherEvent::Ready]);
    }

    #[test]
    fn every_press_sounds() {
        let (mut m, mut audio) = ready();
        press_all(&mut m, &mut audio, "C4 D4");
        assert_eq!(audio.attacks(), vec![Pitch(60), Pitch(62)]);
        assert_eq!(audio.calls[0], Call::Start);
    }

    #[test]
    fn correct_prefix_accumulates() {
        let (mut m, mut audio) = ready();
        let outcomes = press_all(&mut m, &mut audio, "C4 A4 B4");
        assert_eq!(outcomes, vec![PressOutcome::Matched; 3]);
        assert_eq!(m.played().len(), 3);
        assert_eq!(m.match_phase(), MatchPhase::InProgress);
    }

    #[test]
    fn octave_is_ignored_by_default() {
        let (mut m, mut audio) = ready();
        assert_eq!(m.on_key_press(Pitch(72), &mut audio), PressOutcome::Matched);

        let mut exact = SequenceMatcher::new(cabbage()).with_mode(MatchMode::Exact);
        exact.on_audio_ready();
        assert_eq!(exact.on_key_press(Pitch(72), &mut audio), PressOutcome::Mismatched);
    }

    #[test]
    fn wrong_note_shows_then_resets() {
        let (mut m, mut audio) = ready();
        let outcomes = press_all(&mut m, &mut audio, "C4 A4 D4");
        assert_eq!(outcomes[2], PressOutcome::Mismatched);
        assert_eq!(m.played().len(), 3);
        assert!(m.is_error());

        advance(&mut m, &mut audio, 700);
        assert_eq!(m.played().len(), 3);
        advance(&mut m, &mut audio, 120);
        assert!(m.played().is_empty());
        assert_eq!(m.phase(), SequencePhase::Ready);

        assert_eq!(m.on_key_press(Pitch(60), &mut audio), PressOutcome::Matched);
        assert_eq!(m.played(), &[Pitch(60)]);
    }

    #[test]
    fn presses_during_mismatch_only_sound() {
        let (mut m, mut audio) = ready();
        press_all(&mut m, &mut audio, "D4");
        assert_eq!(m.on_key_press(Pitch(60), &mut audio), PressOutcome::SoundOnly);
        assert_eq!(m.played(), &[Pitch(62)]);
        assert_eq!(audio.attacks().len(), 2);
    }

    #[test]
    fn full_match_triggers_win_once() {
        let (mut m, mut audio) = ready();
        let outcomes = press_all(&mut m, &mut audio, "C4 A4 B4 B4 A4 G4 E4");
        assert_eq!(outcomes.last(), Some(&PressOutcome::Completed));
        assert_eq!(m.match_phase(), MatchPhase::Correct);
        assert!(m.is_playing_back());

        // Extra presses are locked out: no sound, no second win.
        let attacks = audio.attacks().len();
        assert_eq!(m.on_key_press(Pitch(60), &mut audio), PressOutcome::Ignored);
        m.on_key_release(Pitch(64), &mut audio);
        assert_eq!(audio.attacks().len(), attacks);
        assert_eq!(m.pending_timers(), 1);

        let completions = m
            .drain_events()
            .filter(|e| *e == MatcherEvent::Completed)
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn win_sequence_replays_then_reveals() {
        let (mut m, mut audio) = ready();
        press_all(&mut m, &mut audio, "C4 A4 B4 B4 A4 G4 E4");
        m.drain_events().for_each(drop);

        advance(&mut m, &mut audio, 500);
        assert_eq!(audio.replayed(), vec![Pitch(60)]);
        assert_eq!(m.highlighted(), Some(Pitch(60)));

        advance(&mut m, &mut audio, 3000);
        assert_eq!(audio.replayed(), cabbage());
        assert!(m.is_playing_back());

        advance(&mut m, &mut audio, 500);
        assert_eq!(m.highlighted(), None);
        assert!(m.is_playing_back());

        advance(&mut m, &mut audio, 700);
        assert!(m.is_won());

        let events: Vec<_> = m.drain_events().collect();
        let highlights = events
            .iter()
            .filter(|e| matches!(e, MatcherEvent::Highlight(Some(_))))
            .count();
        // The repeated B4 keeps its highlight.
        assert_eq!(highlights, 6);
        assert_eq!(events.last(), Some(&MatcherEvent::Won));
    }

    #[test]
    fn won_is_terminal() {
        let (mut m, mut audio) = ready();
        press_all(&mut m, &mut audio, "C4 A4 B4 B4 A4 G4 E4");
        advance(&mut m, &mut audio, 5000);
        assert!(m.is_won());
        assert_eq!(m.on_key_press(Pitch(60), &mut audio), PressOutcome::Ignored);
        assert!(!m.toggle_hint());
        assert!(!m.hint_visible());
    }

    #[test]
    fn hint_is_forced_off_on_completion() {
        let (mut m, mut audio) = ready();
        assert!(m.toggle_hint());
        assert!(m.hint_visible());
        press_all(&mut m, &mut audio, "C4 A4 B4 B4 A4 G4 E4");
        assert!(!m.hint_visible());
        assert!(!m.toggle_hint());
    }

    #[test]
    fn blocked_audio_does_not_stop_matching() {
        let mut m = SequenceMatcher::new(cabbage());
        m.on_audio_ready();
        let mut audio = RecordingAudio::blocked();
        let outcomes = press_all(&mut m, &mut audio, "C4 A4");
        assert_eq!(outcomes, vec![PressOutcome::Matched; 2]);
        let notices = m
            .drain_events()
            .filter(|e| *e == MatcherEvent::AudioBlocked)
            .count();
        assert_eq!(notices, 1);
        // Start failed, so attack was never reached; the next press retries start.
        assert_eq!(
            audio.calls.iter().filter(|c| **c == Call::Start).count(),
            2
        );
    }

    #[test]
    fn teardown_cancels_and_disposes() {
        let (mut m, mut audio) = ready();
        press_all(&mut m, &mut audio, "D4");
        m.teardown(&mut audio);
        assert!(audio.disposed);
        advance(&mut m, &mut audio, 2000);
        assert_eq!(m.played().len(), 1);
        assert_eq!(m.pending_timers(), 0);
    }
}

use serde::Serialize;

use crate::core::scheduler::{Scheduler, SequenceId, Step};
use crate::route::Route;
use super::config::{ChallengeConfig, TimingConfig};

/// Where a guess currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Idle,
    /// Transient: set while a submission is compared.
    Checking,
    /// Wrong guess; the shake window is open.
    Rejected,
    /// Terminal for the page instance.
    Accepted,
}

/// Staged reveal after an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealStage {
    None,
    FadingOutQuestion,
    /// Success card mounted at zero opacity.
    ShowingSuccessCard,
    SuccessCardVisible,
    /// Continue pressed; card exit transition running.
    Leaving,
}

impl RevealStage {
    /// Wire code used by `protocol::stage`.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn card_mounted(self) -> bool {
        self >= RevealStage::ShowingSuccessCard
    }
}

/// Transition notifications, drained by the owning page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeEvent {
    PhaseChanged(Phase),
    StageChanged(RevealStage),
    ShakeStarted,
    ShakeCleared,
    FocusInput,
    Navigate(Route),
}

/// Result of a `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or the challenge is already solved.
    Ignored,
    Rejected,
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Focus,
    EndShake,
    Reveal(RevealStage),
    Leave,
}

/// Single-input "guess the secret" flow:
/// idle → checking → (rejected → idle | accepted → staged reveal → navigate).
pub struct ChallengeMachine {
    config: ChallengeConfig,
    input_value: String,
    accepted_answer: Option<String>,
    phase: Phase,
    is_shaking: bool,
    reveal_stage: RevealStage,
    navigated: bool,
    timers: Scheduler<Action>,
    shake_window: Option<SequenceId>,
    events: Vec<ChallengeEvent>,
}

impl ChallengeMachine {
    pub fn new(config: ChallengeConfig) -> Self {
        Self {
            config,
            input_value: String::new(),
            accepted_answer: None,
            phase: Phase::Idle,
            is_shaking: false,
            reveal_stage: RevealStage::None,
            navigated: false,
            timers: Scheduler::new(),
            shake_window: None,
            events: Vec::new(),
        }
    }

    /// Page mounted: focus the input once the entry animation has started.
    pub fn mount(&mut self) {
        self.timers.after_ms(self.config.timing.focus_delay, Action::Focus);
    }

    /// Replace the answer field's text. Ignored once the input is disabled.
    pub fn set_input(&mut self, value: &str) {
        if self.is_input_disabled() {
            return;
        }
        self.input_value.clear();
        self.input_value.push_str(value);
    }

    /// Check a guess.
    ///
    /// A new wrong guess while the shake window is still open restarts the
    /// window (last writer wins); it does not wait for the previous reset.
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        if self.phase == Phase::Accepted {
            return SubmitOutcome::Ignored;
        }
        let guess = raw.trim();
        if guess.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.set_phase(Phase::Checking);
        if self.config.answer.matches(guess) {
            self.accept(guess);
            SubmitOutcome::Accepted
        } else {
            self.reject();
            SubmitOutcome::Rejected
        }
    }

    /// Submit whatever is currently in the answer field.
    pub fn submit_current(&mut self) -> SubmitOutcome {
        let raw = self.input_value.clone();
        self.submit(&raw)
    }

    /// The continue control. Only live while the success card is fully shown.
    /// Navigation happens after the exit transition, never on the click itself.
    pub fn continue_on(&mut self) -> bool {
        if self.reveal_stage != RevealStage::SuccessCardVisible {
            return false;
        }
        self.set_stage(RevealStage::Leaving);
        self.timers.after_ms(self.config.timing.exit_delay, Action::Leave);
        true
    }

    /// Advance pending steps by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for action in self.timers.tick(dt) {
            self.apply(action);
        }
    }

    /// Page unmounted: nothing scheduled may fire afterwards.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.shake_window = None;
    }

    /// Override timings. Only affects steps scheduled from now on.
    pub fn set_timing(&mut self, timing: TimingConfig) {
        self.config.timing = timing;
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = ChallengeEvent> + '_ {
        self.events.drain(..)
    }

    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reveal_stage(&self) -> RevealStage {
        self.reveal_stage
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// The trimmed guess that solved the challenge.
    pub fn accepted_answer(&self) -> Option<&str> {
        self.accepted_answer.as_deref()
    }

    pub fn is_shaking(&self) -> bool {
        self.is_shaking
    }

    /// The "close, but not quite" message is shown for the whole rejected window.
    pub fn is_error(&self) -> bool {
        self.phase == Phase::Rejected
    }

    pub fn is_input_disabled(&self) -> bool {
        self.phase == Phase::Accepted
    }

    pub fn has_navigated(&self) -> bool {
        self.navigated
    }

    /// Number of scheduled sequences still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn accept(&mut self, guess: &str) {
        if let Some(id) = self.shake_window.take() {
            self.timers.cancel(id);
        }
        if self.is_shaking {
            self.is_shaking = false;
            self.events.push(ChallengeEvent::ShakeCleared);
        }
        self.accepted_answer = Some(guess.to_string());
        self.set_phase(Phase::Accepted);

        let timing = self.config.timing;
        self.timers.schedule([
            Step::after_ms(timing.fade_out_delay, Action::Reveal(RevealStage::FadingOutQuestion)),
            Step::after_ms(timing.mount_card_delay, Action::Reveal(RevealStage::ShowingSuccessCard)),
            Step::after_ms(timing.show_card_delay, Action::Reveal(RevealStage::SuccessCardVisible)),
        ]);
    }

    fn reject(&mut self) {
        if let Some(id) = self.shake_window.take() {
            self.timers.cancel(id);
        }
        self.set_phase(Phase::Rejected);
        self.is_shaking = true;
        self.events.push(ChallengeEvent::ShakeStarted);
        self.shake_window = Some(self.timers.after_ms(self.config.timing.shake, Action::EndShake));
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Focus => {
                if !self.is_input_disabled() {
                    self.events.push(ChallengeEvent::FocusInput);
                }
            }
            Action::EndShake => {
                self.shake_window = None;
                if self.phase != Phase::Rejected {
                    return;
                }
                self.is_shaking = false;
                self.input_value.clear();
                self.events.push(ChallengeEvent::ShakeCleared);
                self.set_phase(Phase::Idle);
                self.events.push(ChallengeEvent::FocusInput);
            }
            Action::Reveal(stage) => self.set_stage(stage),
            Action::Leave => {
                if !self.navigated {
                    self.navigated = true;
                    self.events.push(ChallengeEvent::Navigate(self.config.next_route));
                }
            }
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("challenge phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(ChallengeEvent::PhaseChanged(phase));
        }
    }

    fn set_stage(&mut self, stage: RevealStage) {
        if self.reveal_stage != stage {
            self.reveal_stage = stage;
            self.events.push(ChallengeEvent::StageChanged(stage));
        }
    }
}

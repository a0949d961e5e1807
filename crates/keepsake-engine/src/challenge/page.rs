use serde::{Deserialize, Serialize};

use crate::api::page::{Page, PageContext};
use crate::api::types::ElementId;
use crate::bridge::protocol;
use crate::extensions::{Appearance, Easing, FadeState};
use crate::input::queue::{InputEvent, InputQueue};
use super::config::{ChallengeConfig, TimingConfig};
use super::machine::{ChallengeEvent, ChallengeMachine, Phase, RevealStage};

const QUESTION: ElementId = ElementId(1);
const SUCCESS_CARD: ElementId = ElementId(2);

/// Placeholder in `success_title` replaced by the accepted answer.
pub const ANSWER_PLACEHOLDER: &str = "{answer}";

/// Text shown on a challenge page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeCopy {
    pub title: String,
    pub subtitle: Option<String>,
    pub prompt: Option<String>,
    pub placeholder: String,
    pub error_message: String,
    pub hint: Option<String>,
    pub success_title: String,
    pub success_body: Vec<String>,
    pub continue_label: String,
}

impl Default for ChallengeCopy {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: None,
            prompt: None,
            placeholder: "Type your answer and press Enter".into(),
            error_message: "Close, but not quite! Try again.".into(),
            hint: None,
            success_title: "You got it!".into(),
            success_body: Vec::new(),
            continue_label: "Continue".into(),
        }
    }
}

/// Runtime overrides accepted by `load_config`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChallengeOverrides {
    timing: Option<TimingConfig>,
    copy: Option<ChallengeCopy>,
}

/// Snapshot for the host renderer.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeView {
    pub phase: Phase,
    pub reveal_stage: RevealStage,
    pub input_value: String,
    pub input_disabled: bool,
    pub is_error: bool,
    pub is_shaking: bool,
    /// `None` once the question card has been unmounted.
    pub question: Option<Appearance>,
    /// `None` until the success card is mounted.
    pub success_card: Option<Appearance>,
    pub title: String,
    pub subtitle: Option<String>,
    pub prompt: Option<String>,
    pub placeholder: String,
    pub error_message: Option<String>,
    pub hint: Option<String>,
    pub success_title: String,
    pub success_body: Vec<String>,
    pub continue_label: String,
}

/// A complete answer-challenge page: input handling, staged fades and
/// navigation wired around a `ChallengeMachine`.
pub struct ChallengePage {
    machine: ChallengeMachine,
    fades: FadeState,
    copy: ChallengeCopy,
}

impl ChallengePage {
    pub fn new(config: ChallengeConfig, copy: ChallengeCopy) -> Self {
        Self {
            machine: ChallengeMachine::new(config),
            fades: FadeState::new(),
            copy,
        }
    }

    pub fn machine(&self) -> &ChallengeMachine {
        &self.machine
    }

    pub fn copy(&self) -> &ChallengeCopy {
        &self.copy
    }

    fn fade_seconds(&self) -> f32 {
        self.machine.config().timing.fade_seconds()
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::TextChanged { value } => self.machine.set_input(value),
            InputEvent::Submit => {
                let outcome = self.machine.submit_current();
                log::debug!("submit -> {:?}", outcome);
            }
            InputEvent::Continue => {
                self.machine.continue_on();
            }
            _ => {}
        }
    }

    fn handle_event(&mut self, ctx: &mut PageContext, event: ChallengeEvent) {
        match event {
            ChallengeEvent::StageChanged(stage) => {
                ctx.emit_event(protocol::stage(stage.code()));
                match stage {
                    RevealStage::FadingOutQuestion => {
                        let duration = self.fade_seconds();
                        self.fades.fade_to(QUESTION, 0.0, duration, Easing::QuadOut);
                    }
                    RevealStage::ShowingSuccessCard => self.fades.set(SUCCESS_CARD, 0.0),
                    RevealStage::SuccessCardVisible => {
                        let duration = self.fade_seconds();
                        self.fades.fade_to(SUCCESS_CARD, 1.0, duration, Easing::QuadOut);
                    }
                    RevealStage::Leaving => {
                        let duration = self.machine.config().timing.exit_seconds();
                        self.fades.fade_to(SUCCESS_CARD, 0.0, duration, Easing::QuadIn);
                    }
                    RevealStage::None => {}
                }
            }
            ChallengeEvent::ShakeStarted => ctx.emit_event(protocol::shake(true)),
            ChallengeEvent::ShakeCleared => ctx.emit_event(protocol::shake(false)),
            ChallengeEvent::FocusInput => ctx.emit_event(protocol::focus_input()),
            ChallengeEvent::Navigate(route) => ctx.navigate(route),
            ChallengeEvent::PhaseChanged(_) => {}
        }
    }

    fn success_title(&self) -> String {
        let answer = self.machine.accepted_answer().unwrap_or_default();
        self.copy.success_title.replace(ANSWER_PLACEHOLDER, answer)
    }
}

impl Page for ChallengePage {
    type View = ChallengeView;

    fn init(&mut self, ctx: &mut PageContext) {
        self.machine.mount();
        let duration = self.fade_seconds();
        self.fades.fade_to(QUESTION, 1.0, duration, Easing::QuadOut);
        ctx.prefetch(self.machine.config().next_route);
    }

    fn update(&mut self, ctx: &mut PageContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(event);
        }

        self.machine.tick(ctx.dt);
        let events: Vec<ChallengeEvent> = self.machine.drain_events().collect();
        for event in events {
            self.handle_event(ctx, event);
        }

        self.fades.tick(ctx.dt);
    }

    fn view(&self) -> ChallengeView {
        let stage = self.machine.reveal_stage();
        ChallengeView {
            phase: self.machine.phase(),
            reveal_stage: stage,
            input_value: self.machine.input_value().to_string(),
            input_disabled: self.machine.is_input_disabled(),
            is_error: self.machine.is_error(),
            is_shaking: self.machine.is_shaking(),
            question: (!stage.card_mounted()).then(|| self.fades.appearance(QUESTION)),
            success_card: stage.card_mounted().then(|| self.fades.appearance(SUCCESS_CARD)),
            title: self.copy.title.clone(),
            subtitle: self.copy.subtitle.clone(),
            prompt: self.copy.prompt.clone(),
            placeholder: self.copy.placeholder.clone(),
            error_message: self.machine.is_error().then(|| self.copy.error_message.clone()),
            hint: self.copy.hint.clone(),
            success_title: self.success_title(),
            success_body: self.copy.success_body.clone(),
            continue_label: self.copy.continue_label.clone(),
        }
    }

    fn load_config(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let overrides: ChallengeOverrides = serde_json::from_str(json)?;
        if let Some(timing) = overrides.timing {
            self.machine.set_timing(timing);
        }
        if let Some(copy) = overrides.copy {
            self.copy = copy;
        }
        Ok(())
    }

    fn teardown(&mut self, _ctx: &mut PageContext) {
        self.machine.teardown();
        self.fades.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::{route_of, EVENT_FOCUS_INPUT, EVENT_NAVIGATE, EVENT_SHAKE};
    use crate::challenge::config::Answer;
    use crate::route::Route;

    fn page() -> (ChallengePage, PageContext) {
        let copy = ChallengeCopy {
            title: "What is your name?".into(),
            success_title: "Hello, {answer}!".into(),
            ..ChallengeCopy::default()
        };
        let mut page = ChallengePage::new(
            ChallengeConfig::new(Answer::AnyNonEmpty, Route::RiddleOne),
            copy,
        );
        let mut ctx = PageContext::default();
        page.init(&mut ctx);
        (page, ctx)
    }

    fn step(page: &mut ChallengePage, ctx: &mut PageContext, events: Vec<InputEvent>) {
        let input: InputQueue = events.into_iter().collect();
        page.update(ctx, &input);
    }

    fn idle(page: &mut ChallengePage, ctx: &mut PageContext, frames: u32) {
        for _ in 0..frames {
            step(page, ctx, Vec::new());
        }
    }

    #[test]
    fn init_prefetches_next_page_and_fades_in() {
        let (mut page, mut ctx) = page();
        assert_eq!(route_of(&ctx.events[0]), Some(Route::RiddleOne));

        idle(&mut page, &mut ctx, 60);
        let view = page.view();
        assert!((view.question.unwrap().opacity - 1.0).abs() < 0.01);
        assert!(view.success_card.is_none());
        assert!(ctx.events.iter().any(|e| e.kind_code() == EVENT_FOCUS_INPUT));
    }

    #[test]
    fn greeting_uses_the_submitted_name() {
        let (mut page, mut ctx) = page();
        step(
            &mut page,
            &mut ctx,
            vec![InputEvent::TextChanged { value: " Era ".into() }, InputEvent::Submit],
        );
        idle(&mut page, &mut ctx, 90);

        let view = page.view();
        assert_eq!(view.phase, Phase::Accepted);
        assert_eq!(view.reveal_stage, RevealStage::SuccessCardVisible);
        assert!(view.question.is_none());
        assert!(view.success_card.unwrap().opacity > 0.9);
        assert_eq!(view.success_title, "Hello, Era!");
        assert!(view.input_disabled);
    }

    #[test]
    fn rejection_shows_error_and_shakes() {
        let mut page = ChallengePage::new(
            ChallengeConfig::secret("42", Route::Piano),
            ChallengeCopy::default(),
        );
        let mut ctx = PageContext::default();
        page.init(&mut ctx);
        step(
            &mut page,
            &mut ctx,
            vec![InputEvent::TextChanged { value: "41".into() }, InputEvent::Submit],
        );

        let view = page.view();
        assert!(view.is_error && view.is_shaking);
        assert!(view.error_message.is_some());
        assert!(ctx.events.iter().any(|e| e.kind_code() == EVENT_SHAKE && e.a == 1.0));

        idle(&mut page, &mut ctx, 40);
        let view = page.view();
        assert!(!view.is_error && view.error_message.is_none());
        assert_eq!(view.input_value, "");
    }

    #[test]
    fn continue_navigates_after_exit_transition() {
        let (mut page, mut ctx) = page();
        step(
            &mut page,
            &mut ctx,
            vec![InputEvent::TextChanged { value: "Era".into() }, InputEvent::Submit],
        );
        idle(&mut page, &mut ctx, 60);
        ctx.clear_frame_data();

        step(&mut page, &mut ctx, vec![InputEvent::Continue]);
        assert!(!ctx.events.iter().any(|e| e.kind_code() == EVENT_NAVIGATE));
        idle(&mut page, &mut ctx, 10);
        assert!(!ctx.events.iter().any(|e| e.kind_code() == EVENT_NAVIGATE));

        idle(&mut page, &mut ctx, 15);
        let navigations: Vec<_> = ctx
            .events
            .iter()
            .filter(|e| e.kind_code() == EVENT_NAVIGATE)
            .collect();
        assert_eq!(navigations.len(), 1);
        assert_eq!(route_of(navigations[0]), Some(Route::RiddleOne));
        assert!(page.view().success_card.unwrap().opacity < 0.1);
    }

    #[test]
    fn load_config_overrides_copy_and_timing() {
        let (mut page, _ctx) = page();
        page.load_config(r#"{ "timing": { "shake": 100 }, "copy": { "title": "Riddle" } }"#)
            .unwrap();
        assert_eq!(page.machine().config().timing.shake, 100);
        assert_eq!(page.view().title, "Riddle");
        assert!(page.load_config("not json").is_err());
    }

    #[test]
    fn teardown_silences_pending_work() {
        let (mut page, mut ctx) = page();
        page.teardown(&mut ctx);
        ctx.clear_frame_data();
        idle(&mut page, &mut ctx, 60);
        assert!(ctx.events.is_empty());
    }
}

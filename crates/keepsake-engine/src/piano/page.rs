use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::page::{Page, PageContext};
use crate::api::types::ElementId;
use crate::bridge::protocol;
use crate::core::scheduler::Scheduler;
use crate::extensions::{Appearance, Easing, FadeState};
use crate::input::queue::{InputEvent, InputQueue};
use crate::layout;
use crate::route::Route;
use super::audio::AudioEngine;
use super::keyboard::{KeyboardLayout, KeyboardShortcuts, NoteRange};
use super::matcher::{MatchPhase, MatcherEvent, PianoTiming, SequenceMatcher, SequencePhase};
use super::pitch::Pitch;

const CONTENT: ElementId = ElementId(1);
const MESSAGE: ElementId = ElementId(2);

const ENTRY_FADE: f32 = 0.6;
const EXIT_DELAY_MS: u32 = 300;

/// The tune whose note names spell "CABBAGE".
pub const CABBAGE: [Pitch; 7] = [
    Pitch(60),
    Pitch(69),
    Pitch(71),
    Pitch(71),
    Pitch(69),
    Pitch(67),
    Pitch(64),
];

/// Text shown on the piano page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PianoCopy {
    pub title: String,
    pub instructions: String,
    pub shortcuts: String,
    pub loading: String,
    pub audio_notice: String,
    pub hint_label: String,
    pub error_message: String,
    pub win_title: String,
    pub win_body: String,
    pub continue_label: String,
}

impl Default for PianoCopy {
    fn default() -> Self {
        Self {
            title: "Play the Piano!".into(),
            instructions: "Click the keys or use your keyboard to play!".into(),
            shortcuts: "Keyboard shortcuts: A S D F G H J K L".into(),
            loading: "Loading piano…".into(),
            audio_notice: "Tap a key to enable audio 🔈".into(),
            hint_label: "Show letters".into(),
            error_message: "Oops, wrong note! Start again.".into(),
            win_title: "Bravo! 🎹".into(),
            win_body: "That's the one. On to the last riddle!".into(),
            continue_label: "Continue".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PianoOverrides {
    timing: Option<PianoTiming>,
    copy: Option<PianoCopy>,
}

/// One key as the host should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyView {
    pub midi: u8,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub black: bool,
    /// Letter overlay, present while the hint is on.
    pub label: Option<&'static str>,
    pub shortcut: Option<char>,
    pub pressed: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PianoView {
    pub phase: SequencePhase,
    pub match_phase: MatchPhase,
    pub audio_ready: bool,
    pub played: Vec<Pitch>,
    pub target_length: usize,
    pub is_error: bool,
    pub is_playing_back: bool,
    pub hint_visible: bool,
    pub hint_enabled: bool,
    pub show_audio_notice: bool,
    pub width: f32,
    pub height: f32,
    pub keys: Vec<KeyView>,
    pub content: Appearance,
    /// `None` until the game is won.
    pub message: Option<Appearance>,
    pub copy: PianoCopy,
}

/// The piano mini-game page, generic over the audio backend.
pub struct PianoPage<A: AudioEngine> {
    matcher: SequenceMatcher,
    audio: A,
    range: NoteRange,
    shortcuts: KeyboardShortcuts,
    keyboard: KeyboardLayout,
    held: BTreeSet<Pitch>,
    pointer_note: Option<Pitch>,
    fades: FadeState,
    exit: Scheduler<Route>,
    leaving: bool,
    audio_notice: bool,
    next_route: Route,
    copy: PianoCopy,
}

impl<A: AudioEngine> PianoPage<A> {
    pub fn new(target: Vec<Pitch>, audio: A) -> Self {
        let range = NoteRange::default();
        Self {
            matcher: SequenceMatcher::new(target),
            audio,
            range,
            shortcuts: KeyboardShortcuts::home_row(range),
            keyboard: KeyboardLayout::new(range, layout::MAX_PIANO_WIDTH),
            held: BTreeSet::new(),
            pointer_note: None,
            fades: FadeState::new(),
            exit: Scheduler::new(),
            leaving: false,
            audio_notice: false,
            next_route: Route::Photo,
            copy: PianoCopy::default(),
        }
    }

    /// The fixed "CABBAGE" tune.
    pub fn cabbage(audio: A) -> Self {
        Self::new(CABBAGE.to_vec(), audio)
    }

    pub fn matcher(&self) -> &SequenceMatcher {
        &self.matcher
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn keyboard(&self) -> &KeyboardLayout {
        &self.keyboard
    }

    fn relayout(&mut self, viewport_width: f32) {
        self.keyboard = KeyboardLayout::new(self.range, layout::piano_width(viewport_width));
    }

    fn press(&mut self, pitch: Pitch) {
        if self.matcher.is_locked() || !self.range.contains(pitch) || !self.held.insert(pitch) {
            return;
        }
        let outcome = self.matcher.on_key_press(pitch, &mut self.audio);
        log::debug!("press {} -> {:?}", pitch, outcome);
    }

    fn release(&mut self, pitch: Pitch) {
        if self.held.remove(&pitch) {
            self.matcher.on_key_release(pitch, &mut self.audio);
        }
    }

    fn handle_input(&mut self, ctx: &mut PageContext, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                if let Some(pitch) = self.shortcuts.pitch_for_code(key_code) {
                    self.press(pitch);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(pitch) = self.shortcuts.pitch_for_code(key_code) {
                    self.release(pitch);
                }
            }
            InputEvent::PointerDown { x, y } => {
                if let Some(pitch) = self.keyboard.hit_test(Vec2::new(x, y)) {
                    self.pointer_note = Some(pitch);
                    self.press(pitch);
                }
            }
            InputEvent::PointerUp { .. } => {
                if let Some(pitch) = self.pointer_note.take() {
                    self.release(pitch);
                }
            }
            InputEvent::NoteDown { midi } => self.press(Pitch(midi)),
            InputEvent::NoteUp { midi } => self.release(Pitch(midi)),
            InputEvent::ToggleHint => {
                self.matcher.toggle_hint();
            }
            InputEvent::Resize { width } => {
                ctx.viewport_width = width;
                self.relayout(width);
            }
            InputEvent::Continue => {
                if self.matcher.is_won() && !self.leaving {
                    self.leaving = true;
                    self.fades
                        .fade_to(MESSAGE, 0.0, EXIT_DELAY_MS as f32 / 1000.0, Easing::QuadIn);
                    self.exit.after_ms(EXIT_DELAY_MS, self.next_route);
                }
            }
            InputEvent::TextChanged { .. } | InputEvent::Submit => {}
        }
    }

    fn handle_event(&mut self, ctx: &mut PageContext, event: MatcherEvent) {
        match event {
            MatcherEvent::Highlight(pitch) => {
                ctx.emit_event(protocol::note_highlight(pitch.map(Pitch::midi)));
            }
            MatcherEvent::ContentFading => {
                let duration = self.matcher.timing().content_fade_seconds();
                self.fades.fade_to(CONTENT, 0.0, duration, Easing::QuadInOut);
            }
            MatcherEvent::Won => {
                self.held.clear();
                self.fades.set(MESSAGE, 0.0);
                self.fades.fade_to(MESSAGE, 1.0, ENTRY_FADE, Easing::QuadOut);
                ctx.emit_event(protocol::won());
            }
            MatcherEvent::AudioBlocked => {
                self.audio_notice = true;
                ctx.emit_event(protocol::audio_blocked());
            }
            MatcherEvent::Completed => self.held.clear(),
            MatcherEvent::Ready
            | MatcherEvent::Matched(_)
            | MatcherEvent::Mismatched(_)
            | MatcherEvent::Reset
            | MatcherEvent::HintChanged(_) => {}
        }
    }

    fn key_views(&self) -> Vec<KeyView> {
        let hint = self.matcher.hint_visible();
        let highlighted = self.matcher.highlighted();
        self.keyboard
            .keys()
            .iter()
            .map(|key| KeyView {
                midi: key.pitch.midi(),
                name: key.pitch.sample_name(),
                x: key.min.x,
                y: key.min.y,
                width: key.size.x,
                height: key.size.y,
                black: key.is_black(),
                label: hint.then(|| key.pitch.pitch_name()),
                shortcut: self.shortcuts.key_for(key.pitch),
                pressed: self.held.contains(&key.pitch),
                highlighted: highlighted == Some(key.pitch),
            })
            .collect()
    }
}

impl<A: AudioEngine> Page for PianoPage<A> {
    type View = PianoView;

    fn init(&mut self, ctx: &mut PageContext) {
        self.relayout(ctx.viewport_width);
        self.fades.fade_to(CONTENT, 1.0, ENTRY_FADE, Easing::QuadOut);
        ctx.prefetch(self.next_route);
    }

    fn update(&mut self, ctx: &mut PageContext, input: &InputQueue) {
        if !self.matcher.audio_ready() && self.audio.is_loaded() {
            self.matcher.on_audio_ready();
        }

        for event in input.iter() {
            self.handle_input(ctx, event);
        }

        self.matcher.tick(ctx.dt, &mut self.audio);
        let events: Vec<MatcherEvent> = self.matcher.drain_events().collect();
        for event in events {
            self.handle_event(ctx, event);
        }

        for route in self.exit.tick(ctx.dt) {
            ctx.navigate(route);
        }
        self.fades.tick(ctx.dt);
    }

    fn view(&self) -> PianoView {
        let phase = self.matcher.phase();
        PianoView {
            phase,
            match_phase: self.matcher.match_phase(),
            audio_ready: self.matcher.audio_ready(),
            played: self.matcher.played().to_vec(),
            target_length: self.matcher.target().len(),
            is_error: self.matcher.is_error(),
            is_playing_back: self.matcher.is_playing_back(),
            hint_visible: self.matcher.hint_visible(),
            hint_enabled: !matches!(phase, SequencePhase::PlayingBack | SequencePhase::Won),
            show_audio_notice: self.audio_notice,
            width: self.keyboard.width,
            height: self.keyboard.height,
            keys: self.key_views(),
            content: self.fades.appearance(CONTENT),
            message: self.matcher.is_won().then(|| self.fades.appearance(MESSAGE)),
            copy: self.copy.clone(),
        }
    }

    fn load_config(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let overrides: PianoOverrides = serde_json::from_str(json)?;
        if let Some(timing) = overrides.timing {
            self.matcher.set_timing(timing);
        }
        if let Some(copy) = overrides.copy {
            self.copy = copy;
        }
        Ok(())
    }

    fn teardown(&mut self, _ctx: &mut PageContext) {
        self.matcher.teardown(&mut self.audio);
        self.exit.cancel_all();
        self.fades.clear();
        self.held.clear();
    }
}

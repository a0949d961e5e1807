pub mod api;
pub mod core;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod challenge;
pub mod piano;
pub mod gallery;
pub mod layout;
pub mod route;

// Re-export key types at crate root for convenience
pub use api::page::{Page, PageConfig, PageContext};
pub use api::types::{ElementId, UiEvent};
pub use core::scheduler::{Scheduler, SequenceId, Step};
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::SampleManifest;
pub use bridge::protocol::PROTOCOL_VERSION;
pub use route::Route;
pub use gallery::{Gallery, Photo, PhotoRow};

pub use challenge::{
    Answer, ChallengeConfig, ChallengeCopy, ChallengeEvent, ChallengeMachine,
    ChallengePage, ChallengeView, Phase, RevealStage, SubmitOutcome, TimingConfig,
};
pub use piano::{
    AudioEngine, AudioError, AudioStatus, KeyboardLayout, KeyboardShortcuts, MatchMode,
    MatchPhase, MatcherEvent, NoteRange, PianoPage, PianoTiming, Pitch, PitchError,
    PressOutcome, SequenceMatcher, SequencePhase,
};

// Extensions: optional animation helpers
pub use extensions::{ease, lerp, Appearance, Easing, FadeState};

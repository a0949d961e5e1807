// piano/mod.rs
//
// The piano mini-game: pitches, the on-screen keyboard, the audio
// capability, the note-sequence matcher and the page tying them together.

pub mod audio;
pub mod keyboard;
pub mod matcher;
pub mod page;
pub mod pitch;

pub use audio::{AudioEngine, AudioError, AudioStatus};
pub use keyboard::{KeyRect, KeyboardLayout, KeyboardShortcuts, NoteRange, ShortcutSlot, HOME_ROW};
pub use matcher::{MatchPhase, MatcherEvent, PianoTiming, PressOutcome, SequenceMatcher, SequencePhase};
pub use page::{KeyView, PianoCopy, PianoPage, PianoView, CABBAGE};
pub use pitch::{MatchMode, Pitch, PitchError};

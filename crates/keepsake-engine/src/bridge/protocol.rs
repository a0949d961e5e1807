//! UI event wire codes.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Every event is 4 floats: `[kind, a, b, c]`.
//! ```text
//! NAVIGATE        a = route index
//! PREFETCH        a = route index
//! FOCUS_INPUT     -
//! SHAKE           a = 1 (started) | 0 (cleared)
//! STAGE           a = reveal stage code
//! NOTE_HIGHLIGHT  a = MIDI number, or -1 to clear
//! WON             -
//! AUDIO_BLOCKED   -
//! ```

use crate::api::types::UiEvent;
use crate::route::Route;

/// Protocol version reported to the host at init.
pub const PROTOCOL_VERSION: u32 = 1;

pub const EVENT_NAVIGATE: u32 = 1;
pub const EVENT_PREFETCH: u32 = 2;
pub const EVENT_FOCUS_INPUT: u32 = 3;
pub const EVENT_SHAKE: u32 = 4;
pub const EVENT_STAGE: u32 = 5;
pub const EVENT_NOTE_HIGHLIGHT: u32 = 6;
pub const EVENT_WON: u32 = 7;
pub const EVENT_AUDIO_BLOCKED: u32 = 8;

/// Payload used by NOTE_HIGHLIGHT to clear the highlight.
pub const NO_NOTE: f32 = -1.0;

pub fn navigate(route: Route) -> UiEvent {
    UiEvent::new(EVENT_NAVIGATE, route.index() as f32)
}

pub fn prefetch(route: Route) -> UiEvent {
    UiEvent::new(EVENT_PREFETCH, route.index() as f32)
}

pub fn focus_input() -> UiEvent {
    UiEvent::new(EVENT_FOCUS_INPUT, 0.0)
}

pub fn shake(started: bool) -> UiEvent {
    UiEvent::new(EVENT_SHAKE, if started { 1.0 } else { 0.0 })
}

pub fn stage(code: u32) -> UiEvent {
    UiEvent::new(EVENT_STAGE, code as f32)
}

pub fn note_highlight(midi: Option<u8>) -> UiEvent {
    UiEvent::new(EVENT_NOTE_HIGHLIGHT, midi.map_or(NO_NOTE, f32::from))
}

pub fn won() -> UiEvent {
    UiEvent::new(EVENT_WON, 0.0)
}

pub fn audio_blocked() -> UiEvent {
    UiEvent::new(EVENT_AUDIO_BLOCKED, 0.0)
}

/// Decode a NAVIGATE or PREFETCH payload back into a route.
pub fn route_of(event: &UiEvent) -> Option<Route> {
    match event.kind_code() {
        EVENT_NAVIGATE | EVENT_PREFETCH => Route::from_index(event.a as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EVENT_NAVIGATE,
            EVENT_PREFETCH,
            EVENT_FOCUS_INPUT,
            EVENT_SHAKE,
            EVENT_STAGE,
            EVENT_NOTE_HIGHLIGHT,
            EVENT_WON,
            EVENT_AUDIO_BLOCKED,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn navigate_carries_route() {
        let event = navigate(Route::Piano);
        assert_eq!(event.kind_code(), EVENT_NAVIGATE);
        assert_eq!(route_of(&event), Some(Route::Piano));
        assert_eq!(route_of(&focus_input()), None);
    }

    #[test]
    fn highlight_clear_uses_sentinel() {
        assert_eq!(note_highlight(None).a, NO_NOTE);
        assert_eq!(note_highlight(Some(60)).a, 60.0);
    }
}

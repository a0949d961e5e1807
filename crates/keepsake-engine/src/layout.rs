//! Responsive sizing as pure functions of the observed viewport width.

pub const MIN_PIANO_WIDTH: f32 = 280.0;
pub const MAX_PIANO_WIDTH: f32 = 800.0;
/// Page plus card padding on both sides of the keyboard.
pub const PIANO_SIDE_PADDING: f32 = 56.0;

/// Viewport width at which the larger photo size kicks in.
pub const SMALL_SCREEN_BREAKPOINT: f32 = 640.0;
pub const POLAROID_WIDTH_SMALL: f32 = 144.0;
pub const POLAROID_WIDTH: f32 = 176.0;

/// Keyboard width for a viewport. Unknown widths get the full size.
pub fn piano_width(viewport_width: f32) -> f32 {
    if !viewport_width.is_finite() {
        return MAX_PIANO_WIDTH;
    }
    (viewport_width - 2.0 * PIANO_SIDE_PADDING).clamp(MIN_PIANO_WIDTH, MAX_PIANO_WIDTH)
}

pub fn is_small_screen(viewport_width: f32) -> bool {
    viewport_width < SMALL_SCREEN_BREAKPOINT
}

pub fn polaroid_width(viewport_width: f32) -> f32 {
    if is_small_screen(viewport_width) {
        POLAROID_WIDTH_SMALL
    } else {
        POLAROID_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piano_width_is_clamped() {
        assert_eq!(piano_width(320.0), MIN_PIANO_WIDTH);
        assert_eq!(piano_width(1920.0), MAX_PIANO_WIDTH);
        assert_eq!(piano_width(600.0), 600.0 - 2.0 * PIANO_SIDE_PADDING);
        assert_eq!(piano_width(f32::NAN), MAX_PIANO_WIDTH);
        assert_eq!(piano_width(-10.0), MIN_PIANO_WIDTH);
    }

    #[test]
    fn polaroids_shrink_on_small_screens() {
        assert_eq!(polaroid_width(375.0), POLAROID_WIDTH_SMALL);
        assert_eq!(polaroid_width(640.0), POLAROID_WIDTH);
        assert!(is_small_screen(639.0));
    }
}

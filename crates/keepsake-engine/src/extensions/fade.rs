// extensions/fade.rs
//
// Fade system: animates the opacity of page elements by ElementId.
// Pages read opacities from here when building their view snapshot.
//
// Usage:
//   let mut fades = FadeState::new();
//   fades.fade_to(QUESTION, 1.0, 0.6, Easing::QuadOut);
//   fades.tick(dt);
//   let look = fades.appearance(QUESTION);

use std::collections::HashMap;

use serde::Serialize;

use crate::api::types::ElementId;
use super::easing::{ease, Easing};

/// Vertical slide (px) of an element at opacity 0; it settles as it fades in.
pub const APPEAR_OFFSET: f32 = 20.0;

/// A single opacity transition.
#[derive(Debug, Clone)]
struct Fade {
    from: f32,
    to: f32,
    /// Duration in seconds.
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Fade {
    fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress [0, 1].
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        ease(self.from, self.to, self.progress(), self.easing)
    }
}

/// How an element should be drawn: opacity plus the slide that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Appearance {
    pub opacity: f32,
    pub offset_y: f32,
}

impl Appearance {
    pub fn from_opacity(opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            opacity,
            offset_y: (1.0 - opacity) * APPEAR_OFFSET,
        }
    }
}

/// Current opacity of every known element plus the fades moving them.
#[derive(Debug, Default)]
pub struct FadeState {
    opacity: HashMap<ElementId, f32>,
    fades: HashMap<ElementId, Fade>,
}

impl FadeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump straight to an opacity, dropping any running fade.
    pub fn set(&mut self, element: ElementId, opacity: f32) {
        self.fades.remove(&element);
        self.opacity.insert(element, opacity);
    }

    /// Fade from the element's current opacity to `to`.
    /// Replaces a fade already running on the same element.
    pub fn fade_to(&mut self, element: ElementId, to: f32, duration: f32, easing: Easing) {
        let from = self.opacity(element);
        self.fades.insert(element, Fade::new(from, to, duration, easing));
    }

    /// Current opacity; elements never touched are transparent.
    pub fn opacity(&self, element: ElementId) -> f32 {
        self.opacity.get(&element).copied().unwrap_or(0.0)
    }

    pub fn appearance(&self, element: ElementId) -> Appearance {
        Appearance::from_opacity(self.opacity(element))
    }

    /// Advance all fades; finished ones are dropped at their target opacity.
    pub fn tick(&mut self, dt: f32) {
        for (&element, fade) in self.fades.iter_mut() {
            fade.elapsed += dt;
            self.opacity.insert(element, fade.value());
        }
        self.fades.retain(|_, fade| !fade.is_complete());
    }

    /// Number of running fades.
    pub fn len(&self) -> usize {
        self.fades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fades.is_empty()
    }

    /// Forget every element and fade.
    pub fn clear(&mut self) {
        self.opacity.clear();
        self.fades.clear();
    }
}

// extensions/mod.rs
//
// Optional animation helpers. Pages opt in by owning a FadeState.

pub mod easing;
pub mod fade;

pub use easing::{ease, lerp, Easing};
pub use fade::{Appearance, FadeState, APPEAR_OFFSET};

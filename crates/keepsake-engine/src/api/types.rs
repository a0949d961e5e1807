use bytemuck::{Pod, Zeroable};

/// Identifies an animated page element (question card, success card, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// A UI event communicated from Rust to the TypeScript host.
/// Generic container: `kind` identifies the event (see `bridge::protocol`),
/// `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct UiEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl UiEvent {
    pub const FLOATS: usize = 4;

    /// Event with a single payload value.
    pub fn new(kind: u32, a: f32) -> Self {
        Self {
            kind: kind as f32,
            a,
            b: 0.0,
            c: 0.0,
        }
    }

    /// The event kind as an integer code.
    pub fn kind_code(&self) -> u32 {
        self.kind as u32
    }
}

/// Input events a page understands.
/// The host translates DOM events into these; pages never see the DOM.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The answer field's text changed.
    TextChanged { value: String },
    /// The answer form was submitted (Enter).
    Submit,
    /// The "continue" control on a success card was activated.
    Continue,
    /// The piano hint switch was flipped.
    ToggleHint,
    /// A key was pressed. `key_code` is the Unicode scalar of `KeyboardEvent.key`.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A touch/click began at page coordinates (x, y) relative to the keyboard.
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at page coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A piano key was pressed directly by the keyboard widget.
    NoteDown { midi: u8 },
    /// A piano key was released directly by the keyboard widget.
    NoteUp { midi: u8 },
    /// The viewport was resized.
    Resize { width: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<InputEvent> for InputQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

use std::collections::HashMap;

use glam::Vec2;

use super::pitch::Pitch;

/// Black key size relative to a white key.
pub const BLACK_KEY_WIDTH: f32 = 0.65;
pub const BLACK_KEY_HEIGHT: f32 = 0.6;
/// White key width / height.
pub const KEY_WIDTH_TO_HEIGHT: f32 = 0.33;

/// One slot of a computer-keyboard row: the natural key and the key above it
/// used for the flat of that natural.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutSlot {
    pub natural: char,
    pub flat: char,
}

const fn slot(natural: char, flat: char) -> ShortcutSlot {
    ShortcutSlot { natural, flat }
}

/// `a s d f g h j k l ; '` with `q w e r t y u i o p [` above.
pub const HOME_ROW: [ShortcutSlot; 11] = [
    slot('a', 'q'),
    slot('s', 'w'),
    slot('d', 'e'),
    slot('f', 'r'),
    slot('g', 't'),
    slot('h', 'y'),
    slot('j', 'u'),
    slot('k', 'i'),
    slot('l', 'o'),
    slot(';', 'p'),
    slot('\'', '['),
];

/// Inclusive range of playable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteRange {
    first: Pitch,
    last: Pitch,
}

impl NoteRange {
    /// C4..C6, two octaves.
    pub const DEFAULT: NoteRange = NoteRange {
        first: Pitch(60),
        last: Pitch(84),
    };

    pub fn new(first: Pitch, last: Pitch) -> Self {
        if first <= last {
            Self { first, last }
        } else {
            Self { first: last, last: first }
        }
    }

    pub fn first(&self) -> Pitch {
        self.first
    }

    pub fn last(&self) -> Pitch {
        self.last
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        (self.first..=self.last).contains(&pitch)
    }

    pub fn pitches(&self) -> impl Iterator<Item = Pitch> {
        (self.first.0..=self.last.0).map(Pitch)
    }

    pub fn len(&self) -> usize {
        usize::from(self.last.0.abs_diff(self.first.0)) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn natural_count(&self) -> usize {
        self.pitches().filter(|p| !p.is_accidental()).count()
    }
}

impl Default for NoteRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Computer-keyboard shortcuts for a range of keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardShortcuts {
    by_key: HashMap<char, Pitch>,
}

impl KeyboardShortcuts {
    /// Walk the range from its first note, consuming one slot per natural.
    /// Accidentals take the flat character of the slot that their upper
    /// neighbour will use. Stops when the slots or the range run out.
    pub fn create(range: NoteRange, slots: &[ShortcutSlot]) -> Self {
        let mut by_key = HashMap::new();
        let mut slot_index = 0;

        for pitch in range.pitches() {
            let Some(slot) = slots.get(slot_index) else {
                break;
            };
            if pitch.is_accidental() {
                by_key.insert(slot.flat, pitch);
            } else {
                by_key.insert(slot.natural, pitch);
                slot_index += 1;
            }
        }

        Self { by_key }
    }

    pub fn home_row(range: NoteRange) -> Self {
        Self::create(range, &HOME_ROW)
    }

    /// Pitch bound to a key (case-insensitive).
    pub fn pitch_for(&self, key: char) -> Option<Pitch> {
        self.by_key.get(&key.to_ascii_lowercase()).copied()
    }

    /// Same as `pitch_for`, from a host key code (a Unicode scalar value).
    pub fn pitch_for_code(&self, key_code: u32) -> Option<Pitch> {
        char::from_u32(key_code).and_then(|key| self.pitch_for(key))
    }

    pub fn key_for(&self, pitch: Pitch) -> Option<char> {
        self.by_key
            .iter()
            .find(|(_, &p)| p == pitch)
            .map(|(&key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Screen rectangle of a single key, origin at the keyboard's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRect {
    pub pitch: Pitch,
    pub min: Vec2,
    pub size: Vec2,
}

impl KeyRect {
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmplt(self.max()).all()
    }

    pub fn is_black(&self) -> bool {
        self.pitch.is_accidental()
    }
}

/// Key geometry for a given keyboard width.
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    pub range: NoteRange,
    pub width: f32,
    pub height: f32,
    keys: Vec<KeyRect>,
}

impl KeyboardLayout {
    pub fn new(range: NoteRange, width: f32) -> Self {
        let width = width.max(1.0);
        let white_width = width / range.natural_count().max(1) as f32;
        let height = white_width / KEY_WIDTH_TO_HEIGHT;
        let black_size = Vec2::new(white_width * BLACK_KEY_WIDTH, height * BLACK_KEY_HEIGHT);

        let mut keys = Vec::with_capacity(range.len());
        let mut naturals = 0usize;
        for pitch in range.pitches() {
            if pitch.is_accidental() {
                // Centred on the boundary with the previous white key.
                let boundary = naturals as f32 * white_width;
                keys.push(KeyRect {
                    pitch,
                    min: Vec2::new(boundary - black_size.x / 2.0, 0.0),
                    size: black_size,
                });
            } else {
                keys.push(KeyRect {
                    pitch,
                    min: Vec2::new(naturals as f32 * white_width, 0.0),
                    size: Vec2::new(white_width, height),
                });
                naturals += 1;
            }
        }

        Self {
            range,
            width,
            height,
            keys,
        }
    }

    pub fn keys(&self) -> &[KeyRect] {
        &self.keys
    }

    pub fn key(&self, pitch: Pitch) -> Option<&KeyRect> {
        self.keys.iter().find(|k| k.pitch == pitch)
    }

    /// Key under a point. Black keys sit on top and win.
    pub fn hit_test(&self, point: Vec2) -> Option<Pitch> {
        self.keys
            .iter()
            .filter(|k| k.is_black())
            .chain(self.keys.iter().filter(|k| !k.is_black()))
            .find(|k| k.contains(point))
            .map(|k| k.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_has_two_octaves() {
        let range = NoteRange::default();
        assert_eq!(range.len(), 25);
        assert_eq!(range.natural_count(), 15);
        assert!(range.contains(Pitch(72)));
        assert!(!range.contains(Pitch(85)));
        assert_eq!(NoteRange::new(Pitch(84), Pitch(60)), range);
    }

    #[test]
    fn reversed_range_is_normalized() {
        let range = NoteRange::new(Pitch(72), Pitch(60));
        assert_eq!(range.first(), Pitch(60));
        assert_eq!(range.last(), Pitch(72));
        assert_eq!(range.len(), 13);
        assert_eq!(range.pitches().count(), 13);
        assert_eq!(NoteRange::new(Pitch(64), Pitch(64)).len(), 1);
    }

    #[test]
    fn home_row_shortcuts() {
        let shortcuts = KeyboardShortcuts::home_row(NoteRange::default());
        assert_eq!(shortcuts.pitch_for('a'), Some(Pitch(60)));
        assert_eq!(shortcuts.pitch_for('w'), Some(Pitch(61)));
        assert_eq!(shortcuts.pitch_for('s'), Some(Pitch(62)));
        assert_eq!(shortcuts.pitch_for('D'), Some(Pitch(64)));
        assert_eq!(shortcuts.pitch_for('f'), Some(Pitch(65)));
        assert_eq!(shortcuts.pitch_for('k'), Some(Pitch(72)));
        // 11 naturals C4..F5 plus the 7 accidentals between them.
        assert_eq!(shortcuts.pitch_for('\''), Some(Pitch(77)));
        assert_eq!(shortcuts.len(), 18);
        assert_eq!(shortcuts.pitch_for('z'), None);
        assert_eq!(shortcuts.key_for(Pitch(78)), None);
        assert_eq!(shortcuts.pitch_for_code('a' as u32), Some(Pitch(60)));
    }

    #[test]
    fn e_has_no_flat_shortcut_above_f() {
        let shortcuts = KeyboardShortcuts::home_row(NoteRange::default());
        // E4 -> F4 has no black key, so 'r' stays unbound.
        assert_eq!(shortcuts.pitch_for('r'), None);
        assert_eq!(shortcuts.key_for(Pitch(66)), Some('t'));
    }

    #[test]
    fn white_keys_share_width() {
        let layout = KeyboardLayout::new(NoteRange::default(), 750.0);
        let c4 = layout.key(Pitch(60)).unwrap();
        assert!((c4.size.x - 50.0).abs() < 1e-3);
        assert!((layout.height - 50.0 / KEY_WIDTH_TO_HEIGHT).abs() < 1e-3);
        let c6 = layout.key(Pitch(84)).unwrap();
        assert!((c6.max().x - 750.0).abs() < 1e-3);
    }

    #[test]
    fn hit_test_prefers_black_keys() {
        let layout = KeyboardLayout::new(NoteRange::default(), 750.0);
        // On the C4/D4 boundary near the top: C#4.
        assert_eq!(layout.hit_test(Vec2::new(50.0, 10.0)), Some(Pitch(61)));
        // Same x below the black key: D4.
        assert_eq!(layout.hit_test(Vec2::new(50.0, layout.height - 1.0)), Some(Pitch(62)));
        assert_eq!(layout.hit_test(Vec2::new(10.0, 10.0)), Some(Pitch(60)));
        assert_eq!(layout.hit_test(Vec2::new(-1.0, 10.0)), None);
        assert_eq!(layout.hit_test(Vec2::new(10.0, layout.height + 1.0)), None);
    }
}

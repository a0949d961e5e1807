use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    #[error("empty pitch name")]
    Empty,
    #[error("unknown note letter '{0}'")]
    UnknownLetter(char),
    #[error("bad octave in '{0}'")]
    BadOctave(String),
    #[error("pitch {0} is outside the MIDI range")]
    OutOfRange(i32),
}

/// How a pressed pitch is compared to the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Same letter in any octave.
    #[default]
    PitchClass,
    /// Same key.
    Exact,
}

/// A MIDI note number (C4 = 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch(pub u8);

impl Pitch {
    pub const MAX: u8 = 127;

    pub fn midi(self) -> u8 {
        self.0
    }

    /// 0 = C … 11 = B.
    pub fn pitch_class(self) -> u8 {
        self.0 % 12
    }

    pub fn octave(self) -> i32 {
        i32::from(self.0 / 12) - 1
    }

    /// Sharp spelling of the pitch class: `"C"`, `"C#"`, …
    pub fn pitch_name(self) -> &'static str {
        NAMES[usize::from(self.pitch_class())]
    }

    /// Base letter, the character shown by the hint overlay.
    pub fn letter(self) -> char {
        self.pitch_name().chars().next().unwrap_or('C')
    }

    pub fn is_accidental(self) -> bool {
        self.pitch_name().len() > 1
    }

    /// Name the sampler knows the note by, e.g. `"C4"`.
    pub fn sample_name(self) -> String {
        format!("{}{}", self.pitch_name(), self.octave())
    }

    pub fn matches(self, expected: Pitch, mode: MatchMode) -> bool {
        match mode {
            MatchMode::PitchClass => self.pitch_class() == expected.pitch_class(),
            MatchMode::Exact => self == expected,
        }
    }

    /// Parse a scientific pitch name: `"c4"`, `"C#5"`, `"Bb3"`.
    pub fn parse(name: &str) -> Result<Self, PitchError> {
        let name = name.trim();
        let mut chars = name.chars();
        let letter = chars.next().ok_or(PitchError::Empty)?;
        let base: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            other => return Err(PitchError::UnknownLetter(other)),
        };

        let rest = chars.as_str();
        let (shift, octave) = if let Some(octave) = rest.strip_prefix('#') {
            (1, octave)
        } else if let Some(octave) = rest.strip_prefix('b') {
            (-1, octave)
        } else {
            (0, rest)
        };

        let octave: i32 = octave
            .parse()
            .ok()
            .filter(|octave| (-1..=9).contains(octave))
            .ok_or_else(|| PitchError::BadOctave(name.to_string()))?;
        let midi = (octave + 1) * 12 + base + shift;
        if !(0..=i32::from(Self::MAX)).contains(&midi) {
            return Err(PitchError::OutOfRange(midi));
        }
        Ok(Pitch(midi as u8))
    }

    /// Parse a whitespace- or comma-separated list of pitch names.
    pub fn parse_sequence(names: &str) -> Result<Vec<Pitch>, PitchError> {
        names
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(Pitch::parse)
            .collect()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_name(), self.octave())
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse(s)
    }
}

impl TryFrom<String> for Pitch {
    type Error = PitchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pitch::parse(&value)
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.sample_name()
    }
}

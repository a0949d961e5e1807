use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::piano::pitch::{Pitch, PitchError};

const SALAMANDER_BASE_URL: &str = "https://tonejs.github.io/audio/salamander/";

/// Sample set handed to the host sampler: named pitches → files under `base_url`.
/// The sampler repitches the nearest sample for notes without their own file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleManifest {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    /// Pitch name (e.g. `"C4"`, `"D#4"`) → file name relative to `base_url`.
    pub urls: BTreeMap<String, String>,
    /// Release time in seconds (default: 1).
    #[serde(default = "default_release")]
    pub release: f32,
}

fn default_release() -> f32 {
    1.0
}

impl SampleManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check every key is a pitch name. Returns the sampled pitches in order.
    pub fn pitches(&self) -> Result<Vec<Pitch>, PitchError> {
        let mut pitches = self
            .urls
            .keys()
            .map(|name| Pitch::parse(name))
            .collect::<Result<Vec<_>, _>>()?;
        pitches.sort();
        Ok(pitches)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl Default for SampleManifest {
    /// Salamander grand piano, every minor third from C3 to C7.
    fn default() -> Self {
        let files = [
            ("C3", "C3.mp3"),
            ("D#3", "Ds3.mp3"),
            ("F#3", "Fs3.mp3"),
            ("A3", "A3.mp3"),
            ("C4", "C4.mp3"),
            ("D#4", "Ds4.mp3"),
            ("F#4", "Fs4.mp3"),
            ("A4", "A4.mp3"),
            ("C5", "C5.mp3"),
            ("D#5", "Ds5.mp3"),
            ("F#5", "Fs5.mp3"),
            ("A5", "A5.mp3"),
            ("C6", "C6.mp3"),
            ("D#6", "Ds6.mp3"),
            ("F#6", "Fs6.mp3"),
            ("A6", "A6.mp3"),
            ("C7", "C7.mp3"),
        ];
        Self {
            base_url: SALAMANDER_BASE_URL.to_string(),
            urls: files
                .iter()
                .map(|(pitch, file)| (pitch.to_string(), file.to_string()))
                .collect(),
            release: default_release(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "baseUrl": "/samples/",
            "urls": { "C4": "c4.ogg", "A4": "a4.ogg" }
        }"#;
        let manifest = SampleManifest::from_json(json).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.release, 1.0);
        assert_eq!(manifest.pitches().unwrap(), vec![Pitch(60), Pitch(69)]);
    }

    #[test]
    fn default_covers_the_keyboard() {
        let manifest = SampleManifest::default();
        let pitches = manifest.pitches().unwrap();
        assert_eq!(pitches.first(), Some(&Pitch(48)));
        assert_eq!(pitches.last(), Some(&Pitch(96)));
        assert!(manifest.to_json().unwrap().contains("\"baseUrl\""));
    }

    #[test]
    fn bad_pitch_names_are_reported() {
        let json = r#"{ "baseUrl": "/", "urls": { "H2": "h2.mp3" } }"#;
        let manifest = SampleManifest::from_json(json).unwrap();
        assert_eq!(manifest.pitches(), Err(PitchError::UnknownLetter('H')));
    }
}

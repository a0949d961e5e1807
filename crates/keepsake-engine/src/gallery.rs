use serde::{Deserialize, Serialize};

/// A captioned photo. `alt` doubles as the description line and as the
/// fallback text when the image is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl Photo {
    pub fn new(src: &str, alt: &str, caption: &str) -> Self {
        Self {
            src: src.to_string(),
            alt: alt.to_string(),
            caption: Some(caption.to_string()),
        }
    }
}

/// One gallery row; odd rows put the photo on the right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoRow {
    #[serde(flatten)]
    pub photo: Photo,
    pub reversed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub photos: Vec<Photo>,
}

impl Gallery {
    /// Parse a gallery from JSON: `{ "photos": [{ "src", "alt", "caption"? }] }`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn rows(&self) -> Vec<PhotoRow> {
        self.photos
            .iter()
            .enumerate()
            .map(|(i, photo)| PhotoRow {
                photo: photo.clone(),
                reversed: i % 2 == 1,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self {
            photos: vec![
                Photo::new(
                    "/photos/era-1.jpg",
                    "Also my first public duet with you! 🎤",
                    "Our First Event in Japan! ✈️",
                ),
                Photo::new(
                    "/photos/era-2.jpg",
                    "You finally changed your phone!",
                    "Iphone 16 Pro 📱",
                ),
                Photo::new(
                    "/photos/era-3.jpg",
                    "Thank you for always letting me know youre there",
                    "Soul Pics 📷",
                ),
                Photo::new(
                    "/photos/era-4.jpg",
                    "In this world full of changes, I'll be your constant",
                    "Graduation 🎓",
                ),
            ],
        }
    }
}

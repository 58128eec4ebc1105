/*!
 * Sign catalog records.
 *
 * Records come from a document store where the localized and transliterated
 * variants were written either as a single string or as a list of strings,
 * so both shapes are accepted.
 */

use serde::{Deserialize, Serialize};

/// One or many alternative spellings of a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variants {
    One(String),
    Many(Vec<String>),
}

impl Variants {
    /// Iterate over every spelling
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Variants::One(value) => std::slice::from_ref(value),
            Variants::Many(values) => values.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    /// Case-insensitive match against any spelling
    pub fn matches(&self, word: &str) -> bool {
        self.iter().any(|variant| variant.to_lowercase() == word.to_lowercase())
    }
}

impl From<&str> for Variants {
    fn from(value: &str) -> Self {
        Variants::One(value.to_string())
    }
}

impl From<Vec<&str>> for Variants {
    fn from(values: Vec<&str>) -> Self {
        Variants::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// A sign video in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignEntry {
    /// Canonical (English) word
    pub word: String,

    /// Word written in the input language's script
    #[serde(default, alias = "sinhalaWord", skip_serializing_if = "Option::is_none")]
    pub localized_word: Option<Variants>,

    /// Latin transliteration of the localized word
    #[serde(default, alias = "sinhalaTranslit", skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<Variants>,

    /// Location of the sign video
    #[serde(default)]
    pub video_url: String,

    /// Location of the preview image
    #[serde(default)]
    pub thumbnail_url: String,
}

impl SignEntry {
    /// Create an entry with only the canonical word and video
    pub fn new(word: impl Into<String>, video_url: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            localized_word: None,
            transliteration: None,
            video_url: video_url.into(),
            thumbnail_url: String::new(),
        }
    }

    pub fn with_localized(mut self, variants: impl Into<Variants>) -> Self {
        self.localized_word = Some(variants.into());
        self
    }

    pub fn with_transliteration(mut self, variants: impl Into<Variants>) -> Self {
        self.transliteration = Some(variants.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = thumbnail_url.into();
        self
    }

    /// Whether the entry points at a video at all
    pub fn has_video(&self) -> bool {
        !self.video_url.trim().is_empty()
    }
}

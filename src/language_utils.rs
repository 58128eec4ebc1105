use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// Language utilities for the three supported input languages
///
/// This module maps the user-facing input modes to ISO 639-1 codes and
/// provides validation and display names for language codes.
/// Input language mode selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    /// Romanized or native Sinhala input
    #[default]
    Sinhala,
    /// Romanized or native Tamil input
    Tamil,
    /// English input, no translation step
    English,
}

impl LanguageMode {
    /// ISO 639-1 code for this mode
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sinhala => "si",
            Self::Tamil => "ta",
            Self::English => "en",
        }
    }

    /// English display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sinhala => "Sinhala",
            Self::Tamil => "Tamil",
            Self::English => "English",
        }
    }

    /// Whether text in this mode must be translated to English before lookup
    pub fn needs_translation(&self) -> bool {
        !matches!(self, Self::English)
    }

    /// Resolve a mode from an ISO 639-1/639-3 code
    pub fn from_code(code: &str) -> Result<Self> {
        let part1 = normalize_to_part1(code)?;
        match part1.as_str() {
            "si" => Ok(Self::Sinhala),
            "ta" => Ok(Self::Tamil),
            "en" => Ok(Self::English),
            _ => Err(anyhow!("Unsupported input language: {}", code)),
        }
    }

    /// Cycle to the next mode (Sinhala -> Tamil -> English -> Sinhala)
    pub fn next(&self) -> Self {
        match self {
            Self::Sinhala => Self::Tamil,
            Self::Tamil => Self::English,
            Self::English => Self::Sinhala,
        }
    }
}

impl std::fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sinhala => write!(f, "sinhala"),
            Self::Tamil => write!(f, "tamil"),
            Self::English => write!(f, "english"),
        }
    }
}

impl std::str::FromStr for LanguageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sinhala" => Ok(Self::Sinhala),
            "tamil" => Ok(Self::Tamil),
            "english" => Ok(Self::English),
            other => Self::from_code(other),
        }
    }
}

/// Normalize a language code to ISO 639-1 (2-letter) format
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
    } else if normalized_code.len() == 3 {
        if let Some(part1) = Language::from_639_3(&normalized_code).and_then(|lang| lang.to_639_1()) {
            return Ok(part1.to_string());
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English name of a language from its ISO code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    };

    language
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

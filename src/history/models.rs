use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language_utils::LanguageMode;

/// One saved translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Record id (UUID v4)
    pub id: String,
    /// Text as the user typed it
    pub original_text: String,
    /// Input rendered in its native script, if the language has one
    pub localized_script: Option<String>,
    /// English text the signs were built from, filler words removed
    pub translated_text: String,
    /// Input language
    pub language: LanguageMode,
    /// Creation time, RFC 3339
    pub timestamp: String,
}

impl HistoryRecord {
    /// New record stamped with the current time
    pub fn new(
        original_text: impl Into<String>,
        localized_script: Option<String>,
        translated_text: impl Into<String>,
        language: LanguageMode,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            original_text: original_text.into(),
            localized_script,
            translated_text: translated_text.into(),
            language,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

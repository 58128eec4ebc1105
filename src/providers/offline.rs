/*!
 * Offline Sinhala to English translation.
 *
 * A small dictionary of common romanized Sinhala words. Two-word phrases are
 * tried before single words; unknown words pass through lower-cased.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::Provider;
use crate::errors::ProviderError;
use crate::language_utils::LanguageMode;

static DICTIONARY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        // Greetings
        ("ayubowan", "hello"),
        ("istuti", "thank you"),
        ("oba", "you"),
        ("mama", "i"),
        ("oyaa", "you"),
        ("subha udesanak", "good morning"),
        ("subha rathreeyak", "good night"),
        // Actions
        ("kanna", "eat"),
        ("bonna", "drink"),
        ("balanna", "look"),
        ("enna", "come"),
        ("yanna", "go"),
        ("indaganna", "sit"),
        ("natanna", "dance"),
        // Family
        ("amma", "mother"),
        ("ammaa", "mother"),
        ("thaththa", "father"),
        ("aiya", "brother"),
        ("akka", "sister"),
        ("malli", "younger brother"),
        ("nangi", "younger sister"),
        ("seeya", "grandfather"),
        ("aachchi", "grandmother"),
        // Numbers
        ("eka", "one"),
        ("deka", "two"),
        ("thuna", "three"),
        ("hatara", "four"),
        ("paha", "five"),
        // Colors
        ("rathu", "red"),
        ("nil", "blue"),
        ("kaha", "yellow"),
        ("sudu", "white"),
        ("kalu", "black"),
        // Questions
        ("mokakda", "what"),
        ("kawda", "who"),
        ("koheda", "where"),
        ("aei", "why"),
        ("kohomada", "how"),
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone)]
pub struct OfflineRequest {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct OfflineResponse {
    pub text: String,
    /// Words that were not in the dictionary
    pub unknown_words: Vec<String>,
}

/// Dictionary translator, no network access
#[derive(Debug, Clone, Default)]
pub struct OfflineDictionary;

impl OfflineDictionary {
    pub fn new() -> Self {
        Self
    }

    /// Only Sinhala to English is covered
    pub fn supports(source: LanguageMode, target: LanguageMode) -> bool {
        source == LanguageMode::Sinhala && target == LanguageMode::English
    }

    pub fn lookup(word: &str) -> Option<&'static str> {
        DICTIONARY.get(word).copied()
    }

    /// Translate word by word
    pub fn translate(&self, text: &str) -> OfflineResponse {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|word| word.to_lowercase().chars().filter(|c| !is_ignored_punctuation(*c)).collect::<String>())
            .filter(|word| !word.is_empty())
            .collect();

        let mut translated = Vec::with_capacity(words.len());
        let mut unknown_words = Vec::new();
        let mut i = 0;

        while i < words.len() {
            if i + 1 < words.len() {
                let phrase = format!("{} {}", words[i], words[i + 1]);
                if let Some(english) = Self::lookup(&phrase) {
                    translated.push(english.to_string());
                    i += 2;
                    continue;
                }
            }

            match Self::lookup(&words[i]) {
                Some(english) => translated.push(english.to_string()),
                None => {
                    unknown_words.push(words[i].clone());
                    translated.push(words[i].clone());
                }
            }
            i += 1;
        }

        OfflineResponse {
            text: translated.join(" "),
            unknown_words,
        }
    }
}

fn is_ignored_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '/' | '#' | '!' | '$' | '%' | '^' | '&' | '*' | ';' | ':' | '{' | '}' | '=' | '-' | '_' | '`' | '~' | '(' | ')'
    )
}

#[async_trait]
impl Provider for OfflineDictionary {
    type Request = OfflineRequest;
    type Response = OfflineResponse;

    async fn complete(&self, request: OfflineRequest) -> Result<OfflineResponse, ProviderError> {
        Ok(self.translate(&request.text))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn extract_text(response: &OfflineResponse) -> String {
        response.text.clone()
    }
}

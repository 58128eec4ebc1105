/*!
 * Tokenization and classification of input text.
 *
 * Text is stripped of punctuation, split on whitespace and every token is
 * tagged with one of four classes. Classification priority is fixed:
 * filler word, then single letter, then proper name, then regular word.
 *
 * Proper-name detection is purely capitalization based. Scripts without
 * letter case (Sinhala, Tamil) never produce proper names.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Punctuation removed before splitting
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.,!?;:()\[\]{}'"]"#).expect("punctuation pattern is valid"));

/// Grammatical words that have no sign of their own
pub const FILLER_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "am", "was", "were", "be", "been",
    "and", "or", "but", "if", "of", "at", "by", "for", "with", "about",
    "to", "from", "up", "down", "in", "on", "off", "over", "under",
    "this", "that", "these", "those",
];

/// Capitalized words that are never names
const PRONOUN_EXCEPTIONS: &[&str] = &[
    "i", "my", "me", "mine", "you", "your", "yours", "we", "us", "our", "ours",
];

static FILLER_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| FILLER_WORDS.iter().copied().collect());

/// Classification tag of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    FillerWord,
    SingleLetter,
    ProperName,
    RegularWord,
}

/// A whitespace-delimited unit of input after punctuation stripping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token as typed (case preserved)
    pub raw: String,
    /// Lower-cased, punctuation-free form used for lookups
    pub cleaned: String,
    /// Position in the token sequence
    pub position: usize,
    /// Classification tag
    pub class: TokenClass,
}

/// Facts about the user's original (pre-translation) input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputAnalysis {
    /// Whether the input looks like a word spelled out letter by letter
    pub spelled_out: bool,
    /// Lower-cased forms of original tokens that classify as proper names
    pub proper_name_hints: HashSet<String>,
    /// Lower-cased words assembled from letter runs of the translated text
    pub spelled_words: HashSet<String>,
}

impl InputAnalysis {
    /// Analyze the original input text
    pub fn analyze(text: &str) -> Self {
        let original_tokens: Vec<&str> = text.split_whitespace().collect();
        let proper_name_hints = original_tokens
            .iter()
            .map(|token| strip_punctuation(token))
            .filter(|token| !token.is_empty() && classify(token) == TokenClass::ProperName)
            .map(|token| token.to_lowercase())
            .collect();

        Self {
            spelled_out: has_spaced_letters(&original_tokens),
            proper_name_hints,
            spelled_words: HashSet::new(),
        }
    }

    /// Whether a lower-cased word was written as a name in the original input
    pub fn was_proper_name(&self, cleaned: &str) -> bool {
        self.proper_name_hints.contains(cleaned)
    }

    /// Whether a lower-cased word was put together from spelled-out letters
    pub fn was_spelled_out(&self, cleaned: &str) -> bool {
        self.spelled_words.contains(cleaned)
    }

    /// Merge letter runs of translated text when the input was spelled out.
    ///
    /// Every merged word is remembered so the playlist can spell it again
    /// letter by letter when the catalog has no sign for it.
    pub fn recombine_translated(&mut self, translated: &str) -> String {
        if !self.spelled_out {
            return translated.to_string();
        }

        let tokens: Vec<&str> = translated.split_whitespace().collect();
        let combined = combine_spaced_letters(&tokens);
        let passed_through: HashSet<&str> = tokens.iter().copied().filter(|t| !is_single_letter(t)).collect();

        self.spelled_words.extend(
            combined
                .iter()
                .filter(|word| word.chars().count() > 1 && !passed_through.contains(word.as_str()))
                .map(|word| word.to_lowercase()),
        );
        combined.join(" ")
    }
}

/// Remove ignored punctuation from text
pub fn strip_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, "").into_owned()
}

/// Whether a lower-cased word is a filler word
pub fn is_filler_word(cleaned: &str) -> bool {
    FILLER_SET.contains(cleaned)
}

/// Whether a token is exactly one ASCII letter
pub fn is_single_letter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

/// Whether a token looks like a proper name
pub fn is_proper_name(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    let starts_with_capital = first.is_uppercase();
    let has_internal_capital = chars.any(char::is_uppercase);

    (starts_with_capital || has_internal_capital)
        && !PRONOUN_EXCEPTIONS.contains(&word.to_lowercase().as_str())
}

/// Classify a single punctuation-free token
pub fn classify(raw: &str) -> TokenClass {
    let cleaned = raw.to_lowercase();

    if is_filler_word(&cleaned) {
        TokenClass::FillerWord
    } else if is_single_letter(&cleaned) {
        TokenClass::SingleLetter
    } else if is_proper_name(raw) {
        TokenClass::ProperName
    } else {
        TokenClass::RegularWord
    }
}

/// Split text into classified tokens
pub fn tokenize(text: &str) -> Vec<Token> {
    strip_punctuation(text)
        .split_whitespace()
        .enumerate()
        .map(|(position, raw)| Token {
            raw: raw.to_string(),
            cleaned: raw.to_lowercase(),
            position,
            class: classify(raw),
        })
        .collect()
}

/// Whether at least two tokens are single letters and they make up more than half the input
pub fn has_spaced_letters<S: AsRef<str>>(tokens: &[S]) -> bool {
    if tokens.len() < 2 {
        return false;
    }

    let single_letters = tokens.iter().filter(|t| is_single_letter(t.as_ref())).count();
    single_letters >= 2 && (single_letters as f64 / tokens.len() as f64) > 0.5
}

/// Merge runs of consecutive single-letter tokens into one word each
pub fn combine_spaced_letters<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut current_word = String::new();

    for token in tokens {
        let token = token.as_ref();
        if is_single_letter(token) {
            current_word.push_str(token);
        } else {
            if !current_word.is_empty() {
                result.push(std::mem::take(&mut current_word));
            }
            result.push(token.to_string());
        }
    }

    if !current_word.is_empty() {
        result.push(current_word);
    }

    result
}

/// Drop filler words from text, keeping the remaining words as typed
pub fn remove_filler_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !is_filler_word(&strip_punctuation(word).to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

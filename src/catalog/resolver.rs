/*!
 * Tiered sign lookup.
 *
 * A query is matched, case-insensitively, against the canonical word, then
 * the localized variants, then the transliteration variants. A query made of
 * several words falls back to the first sub-word that resolves. A miss is an
 * ordinary `None`, never an error.
 */

use log::debug;
use std::collections::HashMap;
use std::path::Path;

use super::entry::SignEntry;
use crate::errors::CatalogError;

/// Which lookup tier produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Canonical,
    Localized,
    Transliteration,
    SubWord,
}

/// Read-only, pre-loaded sign catalog
#[derive(Debug, Clone, Default)]
pub struct SignCatalog {
    entries: Vec<SignEntry>,
    /// Lower-cased canonical word -> first entry index
    canonical: HashMap<String, usize>,
    /// Lower-cased localized variant -> first entry index
    localized: HashMap<String, usize>,
    /// Lower-cased transliteration variant -> first entry index
    transliterated: HashMap<String, usize>,
}

impl SignCatalog {
    /// Build a catalog from entries, earlier entries win on duplicate keys
    pub fn new(entries: Vec<SignEntry>) -> Self {
        let mut canonical = HashMap::new();
        let mut localized = HashMap::new();
        let mut transliterated = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            canonical.entry(entry.word.to_lowercase()).or_insert(index);
            if let Some(variants) = &entry.localized_word {
                for variant in variants.iter() {
                    localized.entry(variant.to_lowercase()).or_insert(index);
                }
            }
            if let Some(variants) = &entry.transliteration {
                for variant in variants.iter() {
                    transliterated.entry(variant.to_lowercase()).or_insert(index);
                }
            }
        }

        Self {
            entries,
            canonical,
            localized,
            transliterated,
        }
    }

    /// Parse a catalog from a JSON array of entries
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<SignEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&content)?;
        debug!("Loaded {} sign entries from {:?}", catalog.len(), path.as_ref());
        Ok(catalog)
    }

    pub fn entries(&self) -> &[SignEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a word to a sign entry
    pub fn resolve(&self, word: &str) -> Option<&SignEntry> {
        self.resolve_with_tier(word).map(|(entry, _)| entry)
    }

    /// Resolve a word and report the tier that matched
    pub fn resolve_with_tier(&self, word: &str) -> Option<(&SignEntry, MatchTier)> {
        let query = word.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let tiers = [
            (&self.canonical, MatchTier::Canonical),
            (&self.localized, MatchTier::Localized),
            (&self.transliterated, MatchTier::Transliteration),
        ];
        for (index, tier) in tiers {
            if let Some(&i) = index.get(&query) {
                return Some((&self.entries[i], tier));
            }
        }

        if query.contains(char::is_whitespace) {
            for sub_word in query.split_whitespace() {
                if let Some((entry, _)) = self.resolve_with_tier(sub_word) {
                    debug!("Resolved '{}' through sub-word '{}'", word, sub_word);
                    return Some((entry, MatchTier::SubWord));
                }
            }
        }

        None
    }
}

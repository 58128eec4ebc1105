/*!
 * Playlist construction.
 *
 * Classified tokens are walked in order and turned into playlist items.
 * Filler words are skipped, words and letters with a sign are played,
 * unresolved names are fingerspelled letter by letter and everything else
 * is recorded as missing. Words put back together from spelled-out letters
 * are spelled the same way as names. Every token contributes exactly one
 * `TokenOutcome`.
 */

use log::debug;
use url::Url;

use super::item::{ItemStatus, PlayableClip, Playlist, PlaylistItem, SignRole, TokenOutcome};
use crate::catalog::{SignCatalog, SignEntry};
use crate::text::tokenizer::{InputAnalysis, Token, TokenClass, tokenize};

/// Catalog word of the clip announcing a spelled name
pub const NAME_START_ASSET: &str = "name_start";

/// Catalog word of the clip closing a spelled name
pub const NAME_END_ASSET: &str = "name_end";

/// Whether a URL can be handed to the media player
pub fn is_playable_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Builds playlists against a loaded sign catalog
pub struct PlaylistBuilder<'a> {
    catalog: &'a SignCatalog,
}

impl<'a> PlaylistBuilder<'a> {
    pub fn new(catalog: &'a SignCatalog) -> Self {
        Self { catalog }
    }

    /// Tokenize and build a playlist for the given text
    pub fn build(&self, text: &str, analysis: &InputAnalysis) -> Playlist {
        self.build_from_tokens(&tokenize(text), analysis)
    }

    /// Build a playlist from already classified tokens
    pub fn build_from_tokens(&self, tokens: &[Token], analysis: &InputAnalysis) -> Playlist {
        let mut playlist = Playlist::empty();
        let mut missing = Vec::new();

        for token in tokens {
            let outcome = match token.class {
                TokenClass::FillerWord => {
                    playlist.items.push(PlaylistItem {
                        text: token.raw.clone(),
                        origin_index: token.position,
                        role: SignRole::Normal,
                        status: ItemStatus::Skipped,
                    });
                    playlist.skipped_words.push(token.cleaned.clone());
                    TokenOutcome::Skipped
                }
                TokenClass::SingleLetter => {
                    self.push_lookup(&mut playlist, &mut missing, token, SignRole::Letter)
                }
                TokenClass::ProperName | TokenClass::RegularWord => {
                    if let Some(entry) = self.lookup(&token.cleaned) {
                        push_resolved(&mut playlist, token.raw.clone(), token.position, SignRole::Normal, entry, &token.cleaned);
                        TokenOutcome::Resolved
                    } else if token.class == TokenClass::ProperName
                        || analysis.was_proper_name(&token.cleaned)
                        || analysis.was_spelled_out(&token.cleaned)
                    {
                        self.fingerspell(&mut playlist, &mut missing, token)
                    } else {
                        push_not_found(&mut playlist, token.raw.clone(), token.position, SignRole::Normal);
                        missing.push(token.cleaned.clone());
                        TokenOutcome::Missing
                    }
                }
            };
            playlist.outcomes.push(outcome);
        }

        for word in missing {
            if !playlist.skipped_words.contains(&word) && !playlist.missing_words.contains(&word) {
                playlist.missing_words.push(word);
            }
        }

        debug!(
            "Built playlist {} with {} items, {} playable, {} missing, {} skipped",
            playlist.id,
            playlist.items.len(),
            playlist.playable.len(),
            playlist.missing_words.len(),
            playlist.skipped_words.len()
        );

        playlist
    }

    /// Catalog hit that can actually be played
    fn lookup(&self, query: &str) -> Option<&'a SignEntry> {
        let catalog: &'a SignCatalog = self.catalog;
        let entry = catalog.resolve(query)?;
        if is_playable_url(&entry.video_url) {
            Some(entry)
        } else {
            debug!("Sign for '{}' has no playable video url: '{}'", query, entry.video_url);
            None
        }
    }

    fn push_lookup(
        &self,
        playlist: &mut Playlist,
        missing: &mut Vec<String>,
        token: &Token,
        role: SignRole,
    ) -> TokenOutcome {
        match self.lookup(&token.cleaned) {
            Some(entry) => {
                push_resolved(playlist, token.raw.clone(), token.position, role, entry, &token.cleaned);
                TokenOutcome::Resolved
            }
            None => {
                push_not_found(playlist, token.raw.clone(), token.position, role);
                missing.push(token.cleaned.clone());
                TokenOutcome::Missing
            }
        }
    }

    /// Spell a name letter by letter, bracketed by the indicator clips when the catalog has them
    fn fingerspell(&self, playlist: &mut Playlist, missing: &mut Vec<String>, token: &Token) -> TokenOutcome {
        if let Some(entry) = self.lookup(NAME_START_ASSET) {
            push_resolved(
                playlist,
                NAME_START_ASSET.to_string(),
                token.position,
                SignRole::NameIndicatorStart,
                entry,
                NAME_START_ASSET,
            );
        }

        let name_length = token.raw.chars().count();
        let mut spelled = 0;
        let mut unresolved = 0;

        for (letter_position, ch) in token.raw.chars().enumerate() {
            if !ch.is_alphabetic() {
                continue;
            }
            spelled += 1;

            let letter = ch.to_string();
            let key = letter.to_lowercase();
            let role = SignRole::NameLetter {
                name: token.raw.clone(),
                letter_position,
                name_length,
            };

            match self.lookup(&key) {
                Some(entry) => push_resolved(playlist, letter, token.position, role, entry, &key),
                None => {
                    push_not_found(playlist, letter, token.position, role);
                    missing.push(key);
                    unresolved += 1;
                }
            }
        }

        if let Some(entry) = self.lookup(NAME_END_ASSET) {
            push_resolved(
                playlist,
                NAME_END_ASSET.to_string(),
                token.position,
                SignRole::NameIndicatorEnd,
                entry,
                NAME_END_ASSET,
            );
        }

        if spelled == 0 || unresolved > 0 {
            missing.push(token.cleaned.clone());
            TokenOutcome::Missing
        } else {
            TokenOutcome::Resolved
        }
    }
}

fn push_resolved(
    playlist: &mut Playlist,
    text: String,
    origin_index: usize,
    role: SignRole,
    entry: &SignEntry,
    cache_key: &str,
) {
    let item_index = playlist.items.len();
    playlist.items.push(PlaylistItem {
        text,
        origin_index,
        role,
        status: ItemStatus::Resolved {
            video_url: entry.video_url.clone(),
            thumbnail_url: entry.thumbnail_url.clone(),
        },
    });
    playlist.playable.push(PlayableClip {
        url: entry.video_url.clone(),
        item_index,
        cache_key: cache_key.to_string(),
    });
}

fn push_not_found(playlist: &mut Playlist, text: String, origin_index: usize, role: SignRole) {
    playlist.items.push(PlaylistItem {
        text,
        origin_index,
        role,
        status: ItemStatus::NotFound,
    });
}

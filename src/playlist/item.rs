use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a playlist item stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignRole {
    /// A whole word with its own sign
    Normal,
    /// A single letter typed as its own token
    Letter,
    /// One letter of a fingerspelled name
    NameLetter {
        /// The name being spelled, as typed
        name: String,
        /// Character index of the letter inside the name
        letter_position: usize,
        /// Character length of the name
        name_length: usize,
    },
    /// Clip announcing that a name is about to be spelled
    NameIndicatorStart,
    /// Clip closing a spelled name
    NameIndicatorEnd,
}

/// Resolution result of a playlist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    Resolved { video_url: String, thumbnail_url: String },
    NotFound,
    Skipped,
}

/// One entry of the rendered playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Source text of the item (word, letter or indicator asset name)
    pub text: String,
    /// Position of the originating token
    pub origin_index: usize,
    pub role: SignRole,
    pub status: ItemStatus,
}

impl PlaylistItem {
    pub fn video_url(&self) -> Option<&str> {
        match &self.status {
            ItemStatus::Resolved { video_url, .. } => Some(video_url),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, ItemStatus::Resolved { .. })
    }
}

/// A playable clip and the playlist item it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableClip {
    pub url: String,
    pub item_index: usize,
    /// Key under which the clip is primed in the prefetch cache
    pub cache_key: String,
}

/// How a single classified token was accounted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenOutcome {
    Resolved,
    Missing,
    Skipped,
}

/// Result of building a playlist from one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Identity used to discard stale playback events
    pub id: Uuid,
    /// Every item, including skipped and not-found markers
    pub items: Vec<PlaylistItem>,
    /// Resolved clips in playlist order
    pub playable: Vec<PlayableClip>,
    /// Words and letters without a sign, skipped words excluded
    pub missing_words: Vec<String>,
    /// Filler words that were intentionally left out
    pub skipped_words: Vec<String>,
    /// One outcome per classified token, in token order
    pub outcomes: Vec<TokenOutcome>,
}

impl Playlist {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            items: Vec::new(),
            playable: Vec::new(),
            missing_words: Vec::new(),
            skipped_words: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn playable_urls(&self) -> Vec<String> {
        self.playable.iter().map(|clip| clip.url.clone()).collect()
    }

    /// Item behind a position of the playable sequence
    pub fn item_for_playable(&self, playable_index: usize) -> Option<&PlaylistItem> {
        self.playable
            .get(playable_index)
            .and_then(|clip| self.items.get(clip.item_index))
    }

    pub fn token_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn count(&self, outcome: TokenOutcome) -> usize {
        self.outcomes.iter().filter(|o| **o == outcome).count()
    }
}

/*!
 * Playlist construction from classified tokens.
 *
 * - `item`: playlist items, roles and the playable sequence
 * - `builder`: fallback policy (direct hit, skip, fingerspelling)
 * - `annotation`: display label of the clip being played
 */

pub use self::annotation::current_annotation;
pub use self::builder::{NAME_END_ASSET, NAME_START_ASSET, PlaylistBuilder, is_playable_url};
pub use self::item::{ItemStatus, PlayableClip, Playlist, PlaylistItem, SignRole, TokenOutcome};

pub mod annotation;
pub mod builder;
pub mod item;

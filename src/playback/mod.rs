/*!
 * Playback of the playable sequence.
 *
 * - `media`: the media primitive trait, its events and a dry-run player
 * - `controller`: the playback state machine with retry and skip recovery
 */

pub use self::controller::{PlaybackController, PlaybackState, RetryPolicy};
pub use self::media::{DryRunPlayer, EventKind, MediaPlayer, PlaybackEvent};

pub mod controller;
pub mod media;

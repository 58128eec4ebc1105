/*!
 * Asynchronous priming of sign video assets.
 */

pub use self::cache::{CacheEntry, CacheState, PlaylistReadiness, PrefetchCache};
pub use self::probe::{AssetProbe, HttpProbe};

pub mod cache;
pub mod probe;

/*!
 * Sign catalog: records and tiered lookup.
 */

pub use self::entry::{SignEntry, Variants};
pub use self::resolver::{MatchTier, SignCatalog};

pub mod entry;
pub mod resolver;

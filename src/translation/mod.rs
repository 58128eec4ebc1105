/*!
 * Translation of user input into English.
 *
 * - `core`: the `TextTranslator` trait and the provider-backed service
 * - `cache`: memo of earlier translations
 */

pub use self::cache::TranslationCache;
pub use self::core::{TextTranslator, TranslationService, clean_translation};

pub mod cache;
pub mod core;

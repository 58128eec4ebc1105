/*!
 * Linguistic preprocessing of user input.
 *
 * - `tokenizer`: punctuation stripping, token classification and
 *   spelled-out letter handling
 * - `transliteration`: romanized Sinhala/Tamil to native script
 */

pub use self::tokenizer::{InputAnalysis, Token, TokenClass, tokenize};

pub mod tokenizer;
pub mod transliteration;

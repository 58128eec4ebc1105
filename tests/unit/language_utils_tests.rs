/*!
 * Tests for language modes and ISO code helpers
 */

use signbridge::language_utils::{LanguageMode, get_language_name, normalize_to_part1};

#[test]
fn test_languageMode_fromStr_withNamesAndCodes_shouldParse() {
    assert_eq!("Sinhala".parse::<LanguageMode>().unwrap(), LanguageMode::Sinhala);
    assert_eq!("ta".parse::<LanguageMode>().unwrap(), LanguageMode::Tamil);
    assert_eq!("eng".parse::<LanguageMode>().unwrap(), LanguageMode::English);
    assert!("fr".parse::<LanguageMode>().is_err());
    assert!("klingon".parse::<LanguageMode>().is_err());
}

#[test]
fn test_languageMode_next_shouldCycleThroughModes() {
    assert_eq!(LanguageMode::Sinhala.next(), LanguageMode::Tamil);
    assert_eq!(LanguageMode::Tamil.next(), LanguageMode::English);
    assert_eq!(LanguageMode::English.next(), LanguageMode::Sinhala);
}

#[test]
fn test_languageMode_needsTranslation_shouldBeFalseOnlyForEnglish() {
    assert!(LanguageMode::Sinhala.needs_translation());
    assert!(LanguageMode::Tamil.needs_translation());
    assert!(!LanguageMode::English.needs_translation());
}

#[test]
fn test_normalizeToPart1_withThreeLetterCodes_shouldConvert() {
    assert_eq!(normalize_to_part1("sin").unwrap(), "si");
    assert_eq!(normalize_to_part1(" TAM ").unwrap(), "ta");
    assert_eq!(normalize_to_part1("en").unwrap(), "en");
    assert!(normalize_to_part1("xx").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert!(get_language_name("si").unwrap().contains("Sinhala"));
    assert!(get_language_name("").is_err());
}

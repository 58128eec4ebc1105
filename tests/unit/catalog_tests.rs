/*!
 * Tests for catalog loading and tiered resolution
 */

use anyhow::Result;
use signbridge::catalog::{MatchTier, SignCatalog, Variants};
use signbridge::errors::CatalogError;

use crate::common;

#[test]
fn test_fromJsonFile_withDualShapeRecords_shouldLoadEveryEntry() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_catalog(dir.path())?;

    let catalog = SignCatalog::from_json_file(&path)?;

    assert_eq!(catalog.len(), 3);
    let mother = catalog.resolve("mother").expect("mother is in the catalog");
    assert_eq!(mother.thumbnail_url, "https://cdn.test/thumbs/mother.jpg");
    assert!(matches!(mother.localized_word, Some(Variants::Many(_))));

    let hello = catalog.resolve("hello").expect("hello is in the catalog");
    assert!(matches!(hello.localized_word, Some(Variants::One(_))));
    Ok(())
}

#[test]
fn test_resolve_shouldWalkTiersInOrder() -> Result<()> {
    let catalog = SignCatalog::from_json_str(common::CATALOG_JSON)?;

    assert_eq!(catalog.resolve_with_tier("HELLO").map(|(e, t)| (e.word.as_str(), t)), Some(("hello", MatchTier::Canonical)));
    assert_eq!(catalog.resolve_with_tier("අම්ම").map(|(e, t)| (e.word.as_str(), t)), Some(("mother", MatchTier::Localized)));
    assert_eq!(catalog.resolve_with_tier("Ayubowan").map(|(e, t)| (e.word.as_str(), t)), Some(("hello", MatchTier::Transliteration)));
    assert_eq!(catalog.resolve_with_tier("dear amma").map(|(e, t)| (e.word.as_str(), t)), Some(("mother", MatchTier::SubWord)));
    Ok(())
}

#[test]
fn test_resolve_withUnknownOrEmptyQuery_shouldReturnNone() {
    let catalog = common::fixture_catalog();
    assert!(catalog.resolve("zebra").is_none());
    assert!(catalog.resolve("").is_none());
    assert!(catalog.resolve("   ").is_none());
}

#[test]
fn test_fromJsonStr_withMalformedJson_shouldReturnParseError() {
    let result = SignCatalog::from_json_str("{\"word\": \"hello\"}");
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test]
fn test_fromJsonFile_withMissingFile_shouldReturnIoError() {
    let result = SignCatalog::from_json_file("/nonexistent/signs.json");
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

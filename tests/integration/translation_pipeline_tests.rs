/*!
 * Integration tests running real translation services through the engine
 */

use std::sync::Arc;

use signbridge::app_config::{TranslationConfig, TranslationProvider};
use signbridge::errors::{EngineError, TranslationError};
use signbridge::language_utils::LanguageMode;
use signbridge::playlist::{NAME_END_ASSET, NAME_START_ASSET};
use signbridge::prefetch::PrefetchCache;
use signbridge::providers::mock::MockProvider;
use signbridge::{SignEngine, TranslationService};

use crate::common::{CountingProbe, ScriptedMediaPlayer, fast_config, fixture_catalog, sign_url};

fn engine_with(service: TranslationService) -> SignEngine<ScriptedMediaPlayer> {
    SignEngine::new(
        fast_config(),
        fixture_catalog(),
        Arc::new(service),
        PrefetchCache::new(Arc::new(CountingProbe::new())),
        ScriptedMediaPlayer::new(),
    )
}

fn offline_service() -> TranslationService {
    let config = TranslationConfig {
        provider: TranslationProvider::Offline,
        ..TranslationConfig::default()
    };
    TranslationService::new(config).expect("offline service needs no key")
}

#[tokio::test]
async fn test_offlinePipeline_withCapitalizedName_shouldFingerspellTranslatedWord() {
    let mut engine = engine_with(offline_service());

    let outcome = engine.submit_translation("ayubowan Nimal", LanguageMode::Sinhala).await.unwrap();

    let expected: Vec<String> = ["hello", NAME_START_ASSET, "n", "i", "m", "a", "l", NAME_END_ASSET]
        .iter()
        .map(|name| sign_url(name))
        .collect();
    assert_eq!(outcome.playable_sequence, expected);
    assert!(outcome.missing_words.is_empty());
    assert_eq!(outcome.translated_text, "hello nimal");
}

#[tokio::test]
async fn test_offlinePipeline_withUnknownWords_shouldReportMissing() {
    let mut engine = engine_with(offline_service());

    let outcome = engine.submit_translation("istuti amma", LanguageMode::Sinhala).await.unwrap();

    assert_eq!(outcome.playable_sequence, vec![sign_url("mother")]);
    assert_eq!(outcome.missing_words, vec!["thank", "you"]);
}

#[tokio::test]
async fn test_offlinePipeline_withTamilInput_shouldFailWithUnsupportedPair() {
    let mut engine = engine_with(offline_service());

    let result = engine.submit_translation("vanakkam", LanguageMode::Tamil).await;

    assert!(matches!(
        result,
        Err(EngineError::Translation(TranslationError::UnsupportedPair { .. }))
    ));
}

#[tokio::test]
async fn test_mockPipeline_withChattyProvider_shouldCleanBeforeLookup() {
    let mock = MockProvider::prefixed();
    let mut engine = engine_with(TranslationService::with_mock(mock.clone()));

    let first = engine.submit_translation("amma", LanguageMode::Sinhala).await.unwrap();
    let second = engine.submit_translation("amma", LanguageMode::Sinhala).await.unwrap();

    assert_eq!(first.playable_sequence, vec![sign_url("mother")]);
    assert_eq!(second.playable_sequence, first.playable_sequence);
    assert_ne!(second.playlist_id, first.playlist_id);
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_mockPipeline_withFailingProvider_shouldSurfaceTranslationError() {
    let mut engine = engine_with(TranslationService::with_mock(MockProvider::failing()));

    let result = engine.submit_translation("amma", LanguageMode::Sinhala).await;

    assert!(matches!(result, Err(EngineError::Translation(TranslationError::Provider(_)))));
}

#[tokio::test]
async fn test_mockPipeline_withSpelledOutTamil_shouldSpellMergedWord() {
    let mock = MockProvider::working();
    let mut engine = engine_with(TranslationService::with_mock(mock.clone()));

    let outcome = engine.submit_translation("b o b", LanguageMode::Tamil).await.unwrap();

    assert_eq!(mock.request_count(), 1);
    assert_eq!(outcome.translated_text, "bob");
    assert_eq!(
        outcome.playable_sequence,
        vec![
            sign_url(NAME_START_ASSET),
            sign_url("b"),
            sign_url("o"),
            sign_url("b"),
            sign_url(NAME_END_ASSET),
        ]
    );
}

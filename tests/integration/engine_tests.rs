/*!
 * Integration tests for the sign engine
 */

use std::sync::Arc;

use signbridge::errors::{EngineError, MediaError, PlaybackError};
use signbridge::history::{HistoryStore, Repository};
use signbridge::language_utils::LanguageMode;
use signbridge::playback::{PlaybackEvent, PlaybackState};
use signbridge::playlist::{NAME_END_ASSET, NAME_START_ASSET};

use crate::common::{CountingProbe, ScriptedMediaPlayer, TableTranslator, sign_url, test_engine};

#[tokio::test]
async fn test_submitTranslation_withEmptyInput_shouldReturnEmptyWithoutNetwork() {
    let translator = Arc::new(TableTranslator::new(&[]));
    let probe = Arc::new(CountingProbe::new());
    let mut engine = test_engine(translator.clone(), probe.clone(), ScriptedMediaPlayer::new());

    let outcome = engine.submit_translation("", LanguageMode::Sinhala).await.unwrap();

    assert!(outcome.is_empty());
    assert!(outcome.playable_sequence.is_empty());
    assert!(outcome.missing_words.is_empty());
    assert!(outcome.skipped_words.is_empty());
    assert_eq!(translator.calls(), 0);
    assert_eq!(probe.calls(), 0);
    assert_eq!(engine.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn test_submitTranslation_withSinhalaInput_shouldTranslateAndBuildPlaylist() {
    let translator = Arc::new(TableTranslator::new(&[("ayubowan amma", "Hello mother")]));
    let probe = Arc::new(CountingProbe::new());
    let mut engine = test_engine(translator.clone(), probe, ScriptedMediaPlayer::new());

    let outcome = engine.submit_translation("ayubowan amma", LanguageMode::Sinhala).await.unwrap();

    assert_eq!(translator.calls(), 1);
    assert_eq!(outcome.translated_text, "Hello mother");
    assert_eq!(outcome.playable_sequence, vec![sign_url("hello"), sign_url("mother")]);
    assert!(outcome.localized_script.is_some());
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert_eq!(engine.controller().len(), 2);
}

#[tokio::test]
async fn test_submitTranslation_withEnglishInput_shouldSkipTranslator() {
    let translator = Arc::new(TableTranslator::failing());
    let mut engine = test_engine(translator.clone(), Arc::new(CountingProbe::new()), ScriptedMediaPlayer::new());

    let outcome = engine.submit_translation("the cat is here", LanguageMode::English).await.unwrap();

    assert_eq!(translator.calls(), 0);
    assert_eq!(outcome.skipped_words, vec!["the", "is"]);
    assert_eq!(outcome.translated_text, "cat here");
    assert_eq!(outcome.localized_script, None);
}

#[tokio::test]
async fn test_submitTranslation_withSpelledOutInput_shouldRecombineLetters() {
    let translator = Arc::new(TableTranslator::new(&[("j o h n", "j o h n")]));
    let mut engine = test_engine(translator, Arc::new(CountingProbe::new()), ScriptedMediaPlayer::new());

    let outcome = engine.submit_translation("j o h n", LanguageMode::Sinhala).await.unwrap();

    assert_eq!(outcome.translated_text, "john");
    assert!(outcome.missing_words.is_empty());
    assert_eq!(
        outcome.playable_sequence,
        vec![
            sign_url(NAME_START_ASSET),
            sign_url("j"),
            sign_url("o"),
            sign_url("h"),
            sign_url("n"),
            sign_url(NAME_END_ASSET),
        ]
    );
}

#[tokio::test]
async fn test_submitTranslation_withSpelledOutEnglish_shouldPlayEachLetter() {
    let translator = Arc::new(TableTranslator::new(&[]));
    let mut engine = test_engine(translator.clone(), Arc::new(CountingProbe::new()), ScriptedMediaPlayer::new());

    let outcome = engine.submit_translation("j o h n", LanguageMode::English).await.unwrap();

    assert_eq!(translator.calls(), 0);
    assert_eq!(outcome.translated_text, "j o h n");
    assert_eq!(
        outcome.playable_sequence,
        vec![sign_url("j"), sign_url("o"), sign_url("h"), sign_url("n")]
    );
    assert!(outcome.missing_words.is_empty());
}

#[tokio::test]
async fn test_submitTranslation_withTranslatorFailure_shouldAbortAndStayIdle() {
    let translator = Arc::new(TableTranslator::failing());
    let mut engine = test_engine(translator, Arc::new(CountingProbe::new()), ScriptedMediaPlayer::new());

    let result = engine.submit_translation("amma", LanguageMode::Tamil).await;

    assert!(matches!(result, Err(EngineError::Translation(_))));
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert!(engine.playlist().playable.is_empty());
}

#[tokio::test]
async fn test_beginPlayback_shouldPrefetchThenPlayWithAnnotations() {
    let probe = Arc::new(CountingProbe::new());
    let mut engine = test_engine(Arc::new(TableTranslator::new(&[])), probe.clone(), ScriptedMediaPlayer::new());
    engine.submit_translation("Hello Bob", LanguageMode::English).await.unwrap();

    engine.begin_playback().await.unwrap();
    assert_eq!(engine.readiness().map(|r| r.loaded()), Some(engine.playlist().playable.len()));

    let id = engine.playlist().id;
    let mut labels = Vec::new();
    while engine.state() != PlaybackState::Finished {
        labels.extend(engine.current_annotation());
        engine.handle_event(PlaybackEvent::finished(id)).await.unwrap();
    }

    assert_eq!(
        labels,
        vec![
            "Hello",
            "Name Indicator",
            "B (1/3 of Bob)",
            "o (2/3 of Bob)",
            "b (3/3 of Bob)",
            "End of Name",
        ]
    );
    assert_eq!(engine.current_annotation(), None);
}

#[tokio::test]
async fn test_submitTranslation_whilePlaying_shouldResetAndDropStaleEvents() {
    let mut engine = test_engine(
        Arc::new(TableTranslator::new(&[])),
        Arc::new(CountingProbe::new()),
        ScriptedMediaPlayer::new(),
    );
    engine.submit_translation("hello cat", LanguageMode::English).await.unwrap();
    engine.begin_playback().await.unwrap();
    let old_id = engine.playlist().id;

    let outcome = engine.submit_translation("here", LanguageMode::English).await.unwrap();
    assert_ne!(outcome.playlist_id, old_id);
    assert_eq!(engine.state(), PlaybackState::Idle);

    engine.handle_event(PlaybackEvent::finished(old_id)).await.unwrap();
    assert_eq!(engine.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn test_beginPlayback_calledAgainMidPlaylist_shouldKeepPosition() {
    let mut engine = test_engine(
        Arc::new(TableTranslator::new(&[])),
        Arc::new(CountingProbe::new()),
        ScriptedMediaPlayer::new(),
    );
    engine.submit_translation("hello cat here", LanguageMode::English).await.unwrap();
    engine.begin_playback().await.unwrap();
    engine.skip_forward().await.unwrap();
    engine.skip_forward().await.unwrap();

    engine.begin_playback().await.unwrap();

    assert_eq!(engine.controller().current_index(), 2);
    assert_eq!(engine.state(), PlaybackState::Playing(2));
    assert_eq!(engine.controller().player().attempts(&sign_url("hello")), 1);

    engine.restart().await.unwrap();
    assert_eq!(engine.state(), PlaybackState::Playing(0));
}

#[tokio::test]
async fn test_beginPlayback_withExhaustedFinalClip_shouldSurfacePlaybackError() {
    let failures = vec![MediaError::Transient("reset".to_string()); 3];
    let player = ScriptedMediaPlayer::new().failing(&sign_url("here"), failures);
    let mut engine = test_engine(Arc::new(TableTranslator::new(&[])), Arc::new(CountingProbe::new()), player);
    engine.submit_translation("cat here", LanguageMode::English).await.unwrap();

    engine.begin_playback().await.unwrap();
    let id = engine.playlist().id;
    let result = engine.handle_event(PlaybackEvent::finished(id)).await;

    assert!(matches!(
        result,
        Err(EngineError::Playback(PlaybackError::RetriesExhausted { attempts: 3, .. }))
    ));
    assert_eq!(engine.state(), PlaybackState::Finished);
    assert_eq!(engine.controller().player().attempts(&sign_url("here")), 3);
}

#[tokio::test]
async fn test_beginPlayback_withMissingClip_shouldSkipWithoutRetry() {
    let player = ScriptedMediaPlayer::new().failing(&sign_url("hello"), vec![MediaError::ResourceMissing("404".into())]);
    let mut engine = test_engine(Arc::new(TableTranslator::new(&[])), Arc::new(CountingProbe::new()), player);
    engine.submit_translation("hello cat", LanguageMode::English).await.unwrap();

    engine.begin_playback().await.unwrap();

    assert_eq!(engine.state(), PlaybackState::Playing(1));
    assert_eq!(engine.controller().player().attempts(&sign_url("hello")), 1);
    assert_eq!(engine.current_annotation().as_deref(), Some("cat"));
}

#[tokio::test]
async fn test_saveCurrent_withHistory_shouldAppendRecord() {
    let repo = Arc::new(Repository::new_in_memory().unwrap());
    let translator = Arc::new(TableTranslator::new(&[("istuti amma", "thank you mother")]));
    let mut engine = test_engine(translator, Arc::new(CountingProbe::new()), ScriptedMediaPlayer::new())
        .with_history(repo.clone());

    assert!(engine.save_current().await.unwrap().is_none());

    engine.submit_translation("istuti amma", LanguageMode::Sinhala).await.unwrap();
    let saved = engine.save_current().await.unwrap().expect("a translation is current");

    let records = repo.list(None).await.unwrap();
    assert_eq!(records, vec![saved.clone()]);
    assert_eq!(saved.original_text, "istuti amma");
    assert_eq!(saved.translated_text, "thank you mother");
    assert_eq!(saved.language, LanguageMode::Sinhala);
    assert!(saved.localized_script.is_some());
}

#[tokio::test]
async fn test_saveCurrent_withoutHistory_shouldFail() {
    let mut engine = test_engine(
        Arc::new(TableTranslator::new(&[])),
        Arc::new(CountingProbe::new()),
        ScriptedMediaPlayer::new(),
    );
    engine.submit_translation("hello", LanguageMode::English).await.unwrap();

    assert!(matches!(engine.save_current().await, Err(EngineError::History(_))));
}

/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use signbridge::app_config::{Config, LogLevel, TranslationProvider};
use signbridge::language_utils::LanguageMode;

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.language_mode, LanguageMode::Sinhala);
    assert_eq!(config.translation.provider, TranslationProvider::Gemini);
    assert_eq!(config.playback.playback_rate, 1.5);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillMissingSections() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{"language_mode": "tamil", "translation": {"provider": "offline"}, "log_level": "debug"}"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.language_mode, LanguageMode::Tamil);
    assert_eq!(config.translation.provider, TranslationProvider::Offline);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.prefetch.ready_threshold_percent, 95.0);
    assert_eq!(config.playback.retry_delay_ms, 400);
    Ok(())
}

#[test]
fn test_save_thenLoad_shouldKeepValues() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("conf.json");
    let mut config = Config::default();
    config.language_mode = LanguageMode::English;
    config.prefetch.stagger_ms = 75;

    config.save(&path)?;
    let loaded = Config::load_or_create(&path)?;

    assert_eq!(loaded.language_mode, LanguageMode::English);
    assert_eq!(loaded.prefetch.stagger_ms, 75);
    Ok(())
}

#[test]
fn test_validate_withGeminiAndNoKey_shouldFail() {
    assert!(Config::default().validate().is_err());
}

#[test]
fn test_validate_withOfflineProvider_shouldPass() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Offline;
    assert!(config.validate().is_ok());

    config.prefetch.ready_threshold_percent = 120.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

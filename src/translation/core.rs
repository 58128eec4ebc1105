/*!
 * Core translation service implementation.
 *
 * `TranslationService` turns user input into English before sign lookup.
 * It picks a provider from the configuration, memoizes results and strips
 * the chatty prefixes that generative models like to add.
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use super::cache::TranslationCache;
use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils::LanguageMode;
use crate::providers::Provider;
use crate::providers::gemini::{Gemini, GeminiRequest, translation_prompt};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::offline::{OfflineDictionary, OfflineRequest};

/// Prefixes models put in front of a bare translation
static CHATTY_PREFIXES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)^Translation: ").expect("prefix pattern is valid"),
        Regex::new(r"(?i)^Translated text: ").expect("prefix pattern is valid"),
        Regex::new(r"(?i)^In [a-z]+: ").expect("prefix pattern is valid"),
    ]
});

/// Text translation consumed by the engine
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// Translate `text` from `source` to `target`
    async fn translate(
        &self,
        text: &str,
        source: LanguageMode,
        target: LanguageMode,
    ) -> Result<String, TranslationError>;
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// Google Gemini API
    Gemini { client: Gemini },

    /// Built-in dictionary
    Offline { client: OfflineDictionary },

    /// Scripted provider for tests
    Mock { client: MockProvider },
}

/// Translation service backed by one provider
pub struct TranslationService {
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Memo of earlier translations
    pub cache: TranslationCache,
}

impl TranslationService {
    /// Create a translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let provider = match config.provider {
            ConfigTranslationProvider::Gemini => {
                if config.api_key.trim().is_empty() {
                    return Err(anyhow!("Gemini provider requires an API key"));
                }
                TranslationProviderImpl::Gemini {
                    client: Gemini::new(
                        config.api_key.clone(),
                        config.endpoint.clone(),
                        config.model.clone(),
                        Duration::from_secs(config.timeout_secs),
                    ),
                }
            }
            ConfigTranslationProvider::Offline => TranslationProviderImpl::Offline {
                client: OfflineDictionary::new(),
            },
        };

        let cache = TranslationCache::new(config.cache_enabled);
        Ok(Self { provider, config, cache })
    }

    /// Service backed by a mock provider
    pub fn with_mock(client: MockProvider) -> Self {
        let config = TranslationConfig::default();
        Self {
            provider: TranslationProviderImpl::Mock { client },
            cache: TranslationCache::new(config.cache_enabled),
            config,
        }
    }

    /// Name of the active provider
    pub fn provider_name(&self) -> &'static str {
        match &self.provider {
            TranslationProviderImpl::Gemini { .. } => "Gemini",
            TranslationProviderImpl::Offline { .. } => "Offline dictionary",
            TranslationProviderImpl::Mock { .. } => "Mock",
        }
    }

    /// Check that the provider is reachable
    pub async fn test_connection(&self) -> Result<()> {
        let result = match &self.provider {
            TranslationProviderImpl::Gemini { client } => client.test_connection().await,
            TranslationProviderImpl::Offline { client } => client.test_connection().await,
            TranslationProviderImpl::Mock { client } => client.test_connection().await,
        };
        result.map_err(|e| anyhow!("Failed to connect to {}: {}", self.provider_name(), e))
    }

    async fn request(&self, text: &str, source: LanguageMode, target: LanguageMode) -> Result<String, TranslationError> {
        match &self.provider {
            TranslationProviderImpl::Gemini { client } => {
                let prompt = translation_prompt(text, source.display_name(), target.display_name());
                let response = client.complete(GeminiRequest::from_prompt(prompt)).await?;
                Ok(Gemini::extract_text(&response))
            }
            TranslationProviderImpl::Offline { client } => {
                if !OfflineDictionary::supports(source, target) {
                    return Err(TranslationError::UnsupportedPair {
                        source_language: source.code().to_string(),
                        target_language: target.code().to_string(),
                    });
                }
                let response = client.complete(OfflineRequest { text: text.to_string() }).await?;
                Ok(OfflineDictionary::extract_text(&response))
            }
            TranslationProviderImpl::Mock { client } => {
                let request = MockRequest {
                    text: text.to_string(),
                    source_language: source.code().to_string(),
                    target_language: target.code().to_string(),
                };
                let response = client.complete(request).await?;
                Ok(MockProvider::extract_text(&response))
            }
        }
    }
}

#[async_trait]
impl TextTranslator for TranslationService {
    async fn translate(
        &self,
        text: &str,
        source: LanguageMode,
        target: LanguageMode,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        if source == target {
            return Ok(text.trim().to_string());
        }

        if let Some(cached) = self.cache.get(text, source, target) {
            return Ok(cached);
        }

        debug!("Translating {} chars {} -> {} via {}", text.len(), source.code(), target.code(), self.provider_name());
        let raw = self.request(text, source, target).await?;
        let translated = clean_translation(&raw);
        if translated.is_empty() {
            return Err(TranslationError::EmptyResponse(text.to_string()));
        }

        info!("Translated '{}' -> '{}'", text.trim(), translated);
        self.cache.store(text, source, target, &translated);
        Ok(translated)
    }
}

/// Remove explanatory prefixes from a model's answer
pub fn clean_translation(text: &str) -> String {
    let mut cleaned = text.trim().to_string();
    for prefix in CHATTY_PREFIXES.iter() {
        cleaned = prefix.replace(&cleaned, "").into_owned();
    }
    cleaned.trim().to_string()
}

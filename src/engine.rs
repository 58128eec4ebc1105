/*!
 * The sign engine: public surface tying the pipeline together.
 *
 * A request flows through these steps:
 * 1. analyze the original input (spelled-out letters, proper-name hints)
 * 2. translate to English when the input language needs it, merging the
 *    letters of spelled-out input back into words
 * 3. build the playlist against the sign catalog
 * 4. prime the prefetch cache with the playable sequence
 * 5. hand the sequence to the playback controller, which waits in `Idle`
 *
 * Submitting a new request always resets the controller first, so events
 * still in flight for the previous playlist are dropped as stale.
 */

use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::app_config::Config;
use crate::catalog::SignCatalog;
use crate::errors::EngineError;
use crate::history::{HistoryRecord, HistoryStore};
use crate::language_utils::LanguageMode;
use crate::playback::{MediaPlayer, PlaybackController, PlaybackEvent, PlaybackState};
use crate::playlist::{Playlist, PlaylistBuilder, PlaylistItem, current_annotation};
use crate::prefetch::{PlaylistReadiness, PrefetchCache};
use crate::text::InputAnalysis;
use crate::text::tokenizer::remove_filler_words;
use crate::text::transliteration::to_native_script;
use crate::translation::TextTranslator;

/// Result of one `submit_translation` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationOutcome {
    /// Id of the playlist installed in the controller
    pub playlist_id: Uuid,
    /// Input text as submitted
    pub original_text: String,
    /// Input language
    pub language: LanguageMode,
    /// Input rendered in its native script, when the language has one
    pub localized_script: Option<String>,
    /// English text with filler words removed, for display and history
    pub translated_text: String,
    /// Every playlist item, including skipped and not-found markers
    pub items: Vec<PlaylistItem>,
    /// URLs to play, in order
    pub playable_sequence: Vec<String>,
    pub missing_words: Vec<String>,
    pub skipped_words: Vec<String>,
}

impl TranslationOutcome {
    fn new(original_text: &str, language: LanguageMode, translated_text: String, playlist: &Playlist) -> Self {
        Self {
            playlist_id: playlist.id,
            original_text: original_text.to_string(),
            language,
            localized_script: to_native_script(original_text, language),
            translated_text,
            items: playlist.items.clone(),
            playable_sequence: playlist.playable_urls(),
            missing_words: playlist.missing_words.clone(),
            skipped_words: playlist.skipped_words.clone(),
        }
    }

    fn empty(language: LanguageMode, playlist: &Playlist) -> Self {
        Self {
            playlist_id: playlist.id,
            original_text: String::new(),
            language,
            localized_script: None,
            translated_text: String::new(),
            items: Vec::new(),
            playable_sequence: Vec::new(),
            missing_words: Vec::new(),
            skipped_words: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Text-to-sign engine driving a single media player
pub struct SignEngine<M: MediaPlayer> {
    config: Config,
    catalog: SignCatalog,
    translator: Arc<dyn TextTranslator>,
    cache: PrefetchCache,
    controller: PlaybackController<M>,
    history: Option<Arc<dyn HistoryStore>>,

    playlist: Playlist,
    readiness: Option<PlaylistReadiness>,
    current: Option<TranslationOutcome>,
}

impl<M: MediaPlayer> SignEngine<M> {
    /// Create an engine. The prefetch cache is shared, so pass a clone of a process-wide instance.
    pub fn new(
        config: Config,
        catalog: SignCatalog,
        translator: Arc<dyn TextTranslator>,
        cache: PrefetchCache,
        player: M,
    ) -> Self {
        let controller = PlaybackController::new(player, &config.playback);
        Self {
            config,
            catalog,
            translator,
            cache,
            controller,
            history: None,
            playlist: Playlist::empty(),
            readiness: None,
            current: None,
        }
    }

    /// Attach a history store for `save_current`
    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    /// Translate `text`, build its playlist, start prefetching and install it in the controller.
    ///
    /// Empty input yields an empty outcome without calling the translator.
    /// A translation failure aborts the request and leaves the controller `Idle`.
    pub async fn submit_translation(
        &mut self,
        text: &str,
        mode: LanguageMode,
    ) -> Result<TranslationOutcome, EngineError> {
        self.controller.reset().await;
        self.playlist = Playlist::empty();
        self.readiness = None;
        self.current = None;

        if text.trim().is_empty() {
            debug!("Empty input, nothing to translate");
            return Ok(TranslationOutcome::empty(mode, &self.playlist));
        }

        let mut analysis = InputAnalysis::analyze(text);
        let normalized = if mode.needs_translation() {
            let english = self.translator.translate(text, mode, LanguageMode::English).await?;
            analysis.recombine_translated(&english)
        } else {
            text.trim().to_string()
        };

        let playlist = PlaylistBuilder::new(&self.catalog).build(&normalized, &analysis);
        info!(
            "Playlist {}: {} items, {} playable, {} missing, {} skipped",
            playlist.id,
            playlist.items.len(),
            playlist.playable.len(),
            playlist.missing_words.len(),
            playlist.skipped_words.len()
        );

        let readiness = self.cache.prime_sequence(&playlist.playable, &self.config.prefetch);
        self.controller.load_playlist(playlist.id, playlist.playable_urls());

        let outcome = TranslationOutcome::new(text, mode, remove_filler_words(&normalized), &playlist);
        self.playlist = playlist;
        self.readiness = Some(readiness);
        self.current = Some(outcome.clone());
        Ok(outcome)
    }

    /// Wait for the prefetch threshold (or its max wait), then play from the first clip
    pub async fn begin_playback(&mut self) -> Result<(), EngineError> {
        if let Some(readiness) = &self.readiness {
            if !readiness.wait_ready().await {
                debug!("Starting playback at {:.0}% prefetched", readiness.progress());
            }
        }
        Ok(self.controller.start().await?)
    }

    pub async fn play(&mut self) -> Result<(), EngineError> {
        Ok(self.controller.play().await?)
    }

    pub async fn pause(&mut self) -> Result<(), EngineError> {
        Ok(self.controller.pause().await?)
    }

    pub async fn toggle(&mut self) -> Result<(), EngineError> {
        Ok(self.controller.toggle().await?)
    }

    pub async fn restart(&mut self) -> Result<(), EngineError> {
        Ok(self.controller.restart().await?)
    }

    pub async fn skip_forward(&mut self) -> Result<(), EngineError> {
        Ok(self.controller.skip_forward().await?)
    }

    /// Forward a media event to the controller
    pub async fn handle_event(&mut self, event: PlaybackEvent) -> Result<(), EngineError> {
        Ok(self.controller.handle_event(event).await?)
    }

    /// Label for the clip under the playhead, `None` when nothing is loaded or playback is over
    pub fn current_annotation(&self) -> Option<String> {
        match self.controller.state() {
            PlaybackState::Idle | PlaybackState::Finished => None,
            _ => current_annotation(&self.playlist, self.controller.current_index()),
        }
    }

    /// Save the current translation to history. `Ok(None)` when there is nothing to save.
    pub async fn save_current(&self) -> Result<Option<HistoryRecord>, EngineError> {
        let Some(outcome) = &self.current else {
            return Ok(None);
        };
        let history = self
            .history
            .as_ref()
            .ok_or_else(|| EngineError::History("no history store configured".to_string()))?;

        let record = HistoryRecord::new(
            outcome.original_text.trim(),
            outcome.localized_script.clone(),
            outcome.translated_text.clone(),
            outcome.language,
        );
        history.append(&record).await?;
        info!("Saved translation {} to history", record.id);
        Ok(Some(record))
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_outcome(&self) -> Option<&TranslationOutcome> {
        self.current.as_ref()
    }

    pub fn readiness(&self) -> Option<&PlaylistReadiness> {
        self.readiness.as_ref()
    }

    pub fn cache(&self) -> &PrefetchCache {
        &self.cache
    }

    pub fn catalog(&self) -> &SignCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

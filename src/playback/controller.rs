/*!
 * Sequential playback of a playable sequence.
 *
 * The controller owns its state; callers only request transitions. Every
 * load goes through `&mut self`, so a controller never has more than one
 * load in flight. Failures are recovered inside the controller:
 *
 * - transient failures are retried after a delay, up to `max_retries` times,
 *   then the clip is skipped
 * - missing resources are skipped without a retry
 * - retries running out on the final clip is the only failure returned to
 *   the caller
 *
 * Events carry the id of the playlist they were produced for. Events for
 * any other playlist are stale and dropped.
 */

use log::{debug, error, warn};
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use super::media::{EventKind, MediaPlayer, PlaybackEvent};
use crate::app_config::PlaybackConfig;
use crate::errors::{MediaError, PlaybackError};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading(usize),
    Playing(usize),
    Paused(usize),
    Error { index: usize, retry_count: u32 },
    Finished,
}

/// Retry behavior for transient failures.
///
/// The retry counter belongs to the clip, not to one load: it only resets
/// when the controller moves to another clip. A clip that needed retries to
/// load and then fails again mid-play has fewer retries left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Wait before a retry
    pub retry_delay: Duration,
    /// Wait before moving past a failed clip
    pub advance_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&PlaybackConfig::default())
    }
}

impl From<&PlaybackConfig> for RetryPolicy {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            advance_delay: Duration::from_millis(config.advance_delay_ms),
        }
    }
}

/// What to do after a failure was handled
enum Recovery {
    Reload,
    Stop,
}

/// State machine driving a `MediaPlayer` through a playable sequence
pub struct PlaybackController<M: MediaPlayer> {
    player: M,
    policy: RetryPolicy,
    playback_rate: f32,

    playlist_id: Option<Uuid>,
    urls: Vec<String>,

    state: PlaybackState,
    current_index: usize,
    retry_count: u32,
    is_playing: bool,
    last_error: Option<MediaError>,
}

impl<M: MediaPlayer> PlaybackController<M> {
    pub fn new(player: M, config: &PlaybackConfig) -> Self {
        Self {
            player,
            policy: RetryPolicy::from(config),
            playback_rate: config.playback_rate,
            playlist_id: None,
            urls: Vec::new(),
            state: PlaybackState::Idle,
            current_index: 0,
            retry_count: 0,
            is_playing: false,
            last_error: None,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn last_error(&self) -> Option<&MediaError> {
        self.last_error.as_ref()
    }

    pub fn playlist_id(&self) -> Option<Uuid> {
        self.playlist_id
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn player(&self) -> &M {
        &self.player
    }

    /// Install a new playable sequence. The controller stays `Idle` until started.
    pub fn load_playlist(&mut self, playlist_id: Uuid, urls: Vec<String>) {
        debug!("Playlist {} installed with {} clips", playlist_id, urls.len());
        self.playlist_id = Some(playlist_id);
        self.urls = urls;
        self.state = PlaybackState::Idle;
        self.current_index = 0;
        self.retry_count = 0;
        self.is_playing = false;
        self.last_error = None;
    }

    /// Drop the current playlist and return to `Idle`. Late events for it become stale.
    pub async fn reset(&mut self) {
        if self.state != PlaybackState::Idle {
            self.unload_quietly().await;
        }
        self.playlist_id = None;
        self.urls.clear();
        self.state = PlaybackState::Idle;
        self.current_index = 0;
        self.retry_count = 0;
        self.is_playing = false;
        self.last_error = None;
    }

    /// Load the first clip and play it. Only an `Idle` controller starts; use `restart` to rewind.
    pub async fn start(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlaybackState::Idle {
            debug!("Start ignored in state {:?}", self.state);
            return Ok(());
        }
        if self.urls.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        self.current_index = 0;
        self.retry_count = 0;
        self.run(true).await
    }

    /// Resume a paused clip, or start an idle playlist
    pub async fn play(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Idle => self.start().await,
            PlaybackState::Paused(index) => match self.player.play().await {
                Ok(()) => {
                    self.state = PlaybackState::Playing(index);
                    self.is_playing = true;
                    Ok(())
                }
                Err(e) => self.recover_and_run(e, true).await,
            },
            _ => Ok(()),
        }
    }

    pub async fn pause(&mut self) -> Result<(), PlaybackError> {
        if let PlaybackState::Playing(index) = self.state {
            if let Err(e) = self.player.pause().await {
                warn!("Pause failed on clip {}: {}", index, e);
            }
            self.state = PlaybackState::Paused(index);
            self.is_playing = false;
        }
        Ok(())
    }

    pub async fn toggle(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Playing(_) => self.pause().await,
            _ => self.play().await,
        }
    }

    /// Unload and play again from the first clip
    pub async fn restart(&mut self) -> Result<(), PlaybackError> {
        if self.urls.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        self.unload_quietly().await;
        self.current_index = 0;
        self.retry_count = 0;
        self.last_error = None;
        self.run(true).await
    }

    /// Move to the next clip. No-op on the last clip or when nothing is loaded.
    pub async fn skip_forward(&mut self) -> Result<(), PlaybackError> {
        if matches!(self.state, PlaybackState::Idle | PlaybackState::Finished) {
            return Ok(());
        }
        let autoplay = self.is_playing;
        if !self.advance() {
            debug!("Already at the last clip");
            return Ok(());
        }
        self.unload_quietly().await;
        self.run(autoplay).await
    }

    /// React to an event from the media primitive
    pub async fn handle_event(&mut self, event: PlaybackEvent) -> Result<(), PlaybackError> {
        if self.playlist_id != Some(event.playlist_id) {
            debug!("Dropping stale event for playlist {}", event.playlist_id);
            return Ok(());
        }

        match event.kind {
            EventKind::Finished => {
                if !matches!(self.state, PlaybackState::Playing(_)) {
                    return Ok(());
                }
                if self.advance() {
                    self.run(true).await
                } else {
                    self.finish();
                    Ok(())
                }
            }
            EventKind::Error(e) => {
                if !matches!(self.state, PlaybackState::Playing(_) | PlaybackState::Loading(_)) {
                    return Ok(());
                }
                let autoplay = self.is_playing;
                self.recover_and_run(e, autoplay).await
            }
        }
    }

    /// Load the current clip, recovering from failures until a clip loads or the list ends
    async fn run(&mut self, autoplay: bool) -> Result<(), PlaybackError> {
        loop {
            let index = self.current_index;
            let Some(url) = self.urls.get(index).cloned() else {
                self.finish();
                return Ok(());
            };

            self.state = PlaybackState::Loading(index);
            self.is_playing = false;
            debug!("Loading clip {} ({})", index, url);

            let mut result = self.player.load(&url, self.playback_rate).await;
            if result.is_ok() && autoplay {
                result = self.player.play().await;
            }

            match result {
                Ok(()) => {
                    self.is_playing = autoplay;
                    self.state = if autoplay {
                        PlaybackState::Playing(index)
                    } else {
                        PlaybackState::Paused(index)
                    };
                    return Ok(());
                }
                Err(e) => match self.recover(e).await? {
                    Recovery::Reload => continue,
                    Recovery::Stop => return Ok(()),
                },
            }
        }
    }

    async fn recover_and_run(&mut self, error: MediaError, autoplay: bool) -> Result<(), PlaybackError> {
        match self.recover(error).await? {
            Recovery::Reload => self.run(autoplay).await,
            Recovery::Stop => Ok(()),
        }
    }

    async fn recover(&mut self, failure: MediaError) -> Result<Recovery, PlaybackError> {
        let index = self.current_index;
        self.is_playing = false;
        self.last_error = Some(failure.clone());

        match failure {
            MediaError::ResourceMissing(reason) => {
                warn!("Sign video {} not found, skipping: {}", index, reason);
                Ok(self.skip_failed().await)
            }
            MediaError::Transient(reason) => {
                self.retry_count += 1;
                self.state = PlaybackState::Error {
                    index,
                    retry_count: self.retry_count,
                };

                if self.retry_count <= self.policy.max_retries {
                    debug!(
                        "Clip {} failed ({}), retry {}/{}",
                        index, reason, self.retry_count, self.policy.max_retries
                    );
                    sleep(self.policy.retry_delay).await;
                    return Ok(Recovery::Reload);
                }

                if self.is_last() {
                    let attempts = self.retry_count;
                    let url = self.urls.get(index).cloned().unwrap_or_default();
                    error!("Unable to load sign video {} after {} attempts", url, attempts);
                    self.finish();
                    return Err(PlaybackError::RetriesExhausted { url, attempts });
                }

                warn!("Giving up on clip {} after {} attempts", index, self.retry_count);
                Ok(self.skip_failed().await)
            }
        }
    }

    async fn skip_failed(&mut self) -> Recovery {
        if self.is_last() {
            self.finish();
            return Recovery::Stop;
        }
        if !self.policy.advance_delay.is_zero() {
            sleep(self.policy.advance_delay).await;
        }
        self.advance();
        Recovery::Reload
    }

    /// Step to the next clip, resetting the retry counter
    fn advance(&mut self) -> bool {
        if self.current_index + 1 < self.urls.len() {
            self.current_index += 1;
            self.retry_count = 0;
            true
        } else {
            false
        }
    }

    fn is_last(&self) -> bool {
        self.current_index + 1 >= self.urls.len()
    }

    fn finish(&mut self) {
        self.state = PlaybackState::Finished;
        self.is_playing = false;
        self.retry_count = 0;
    }

    async fn unload_quietly(&mut self) {
        if let Err(e) = self.player.unload().await {
            debug!("Unload failed: {}", e);
        }
    }
}

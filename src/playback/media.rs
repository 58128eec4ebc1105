use async_trait::async_trait;
use log::info;
use uuid::Uuid;

use crate::errors::MediaError;

/// Media decode/render primitive driven by the playback controller
#[async_trait]
pub trait MediaPlayer: Send {
    /// Load a clip, playing at `rate` once started
    async fn load(&mut self, url: &str, rate: f32) -> Result<(), MediaError>;

    async fn play(&mut self) -> Result<(), MediaError>;

    async fn pause(&mut self) -> Result<(), MediaError>;

    /// Release the loaded clip
    async fn unload(&mut self) -> Result<(), MediaError>;
}

/// Event reported by the media primitive for the clip it is playing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Finished,
    Error(MediaError),
}

/// Media event tagged with the playlist it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackEvent {
    pub playlist_id: Uuid,
    pub kind: EventKind,
}

impl PlaybackEvent {
    pub fn finished(playlist_id: Uuid) -> Self {
        Self {
            playlist_id,
            kind: EventKind::Finished,
        }
    }

    pub fn error(playlist_id: Uuid, error: MediaError) -> Self {
        Self {
            playlist_id,
            kind: EventKind::Error(error),
        }
    }
}

/// Player that only logs the commands it receives
#[derive(Debug, Default)]
pub struct DryRunPlayer {
    loaded: Vec<String>,
}

impl DryRunPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every url loaded so far, in order
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}

#[async_trait]
impl MediaPlayer for DryRunPlayer {
    async fn load(&mut self, url: &str, rate: f32) -> Result<(), MediaError> {
        info!("load {} at {:.1}x", url, rate);
        self.loaded.push(url.to_string());
        Ok(())
    }

    async fn play(&mut self) -> Result<(), MediaError> {
        info!("play");
        Ok(())
    }

    async fn pause(&mut self) -> Result<(), MediaError> {
        info!("pause");
        Ok(())
    }

    async fn unload(&mut self) -> Result<(), MediaError> {
        info!("unload");
        Ok(())
    }
}

/*!
 * Tests for the playback controller's recovery behavior
 */

use signbridge::app_config::PlaybackConfig;
use signbridge::errors::{MediaError, PlaybackError};
use signbridge::playback::{PlaybackController, PlaybackEvent, PlaybackState};
use uuid::Uuid;

use crate::common::{ScriptedMediaPlayer, sign_url};

fn quick_playback() -> PlaybackConfig {
    PlaybackConfig {
        retry_delay_ms: 1,
        advance_delay_ms: 0,
        ..PlaybackConfig::default()
    }
}

fn urls(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| sign_url(name)).collect()
}

fn transient() -> MediaError {
    MediaError::Transient("network timeout".to_string())
}

#[tokio::test]
async fn test_start_withPersistentTransientFailure_shouldAttemptThreeTimesThenSkip() {
    let player = ScriptedMediaPlayer::new().failing(&sign_url("a"), vec![transient(); 5]);
    let mut controller = PlaybackController::new(player, &quick_playback());
    controller.load_playlist(Uuid::new_v4(), urls(&["a", "b"]));

    controller.start().await.unwrap();

    assert_eq!(controller.player().attempts(&sign_url("a")), 3);
    assert_eq!(controller.state(), PlaybackState::Playing(1));
    assert_eq!(controller.retry_count(), 0);
}

#[tokio::test]
async fn test_start_withTransientFailureThenSuccess_shouldPlaySameClip() {
    let player = ScriptedMediaPlayer::new().failing(&sign_url("a"), vec![transient()]);
    let mut controller = PlaybackController::new(player, &quick_playback());
    controller.load_playlist(Uuid::new_v4(), urls(&["a", "b"]));

    controller.start().await.unwrap();

    assert_eq!(controller.player().attempts(&sign_url("a")), 2);
    assert_eq!(controller.state(), PlaybackState::Playing(0));
}

#[tokio::test]
async fn test_start_withMissingResource_shouldAttemptOnceThenSkip() {
    let missing = MediaError::ResourceMissing("404".to_string());
    let player = ScriptedMediaPlayer::new().failing(&sign_url("a"), vec![missing.clone(), missing]);
    let mut controller = PlaybackController::new(player, &quick_playback());
    controller.load_playlist(Uuid::new_v4(), urls(&["a", "b"]));

    controller.start().await.unwrap();

    assert_eq!(controller.player().attempts(&sign_url("a")), 1);
    assert_eq!(controller.state(), PlaybackState::Playing(1));
}

#[tokio::test]
async fn test_start_withExhaustedRetriesOnLastClip_shouldSurfaceError() {
    let player = ScriptedMediaPlayer::new().failing(&sign_url("z"), vec![transient(); 3]);
    let mut controller = PlaybackController::new(player, &quick_playback());
    controller.load_playlist(Uuid::new_v4(), urls(&["z"]));

    let result = controller.start().await;

    assert_eq!(
        result,
        Err(PlaybackError::RetriesExhausted {
            url: sign_url("z"),
            attempts: 3
        })
    );
    assert_eq!(controller.state(), PlaybackState::Finished);
}

#[tokio::test]
async fn test_handleEvent_withFinishedClips_shouldWalkToEnd() {
    let id = Uuid::new_v4();
    let mut controller = PlaybackController::new(ScriptedMediaPlayer::new(), &quick_playback());
    controller.load_playlist(id, urls(&["a", "b", "c"]));
    controller.start().await.unwrap();

    for expected in [1, 2] {
        controller.handle_event(PlaybackEvent::finished(id)).await.unwrap();
        assert_eq!(controller.state(), PlaybackState::Playing(expected));
        assert_eq!(controller.current_index(), expected);
    }
    controller.handle_event(PlaybackEvent::finished(id)).await.unwrap();

    assert_eq!(controller.state(), PlaybackState::Finished);
    assert_eq!(controller.player().loads(), urls(&["a", "b", "c"]).as_slice());
}

#[tokio::test]
async fn test_handleEvent_withErrorWhilePlaying_shouldRetrySameClip() {
    let id = Uuid::new_v4();
    let mut controller = PlaybackController::new(ScriptedMediaPlayer::new(), &quick_playback());
    controller.load_playlist(id, urls(&["a", "b"]));
    controller.start().await.unwrap();

    controller.handle_event(PlaybackEvent::error(id, transient())).await.unwrap();

    assert_eq!(controller.state(), PlaybackState::Playing(0));
    assert_eq!(controller.player().attempts(&sign_url("a")), 2);
}

#[tokio::test]
async fn test_handleEvent_withStalePlaylistId_shouldBeIgnored() {
    let old_id = Uuid::new_v4();
    let mut controller = PlaybackController::new(ScriptedMediaPlayer::new(), &quick_playback());
    controller.load_playlist(old_id, urls(&["a"]));
    controller.start().await.unwrap();

    let new_id = Uuid::new_v4();
    controller.reset().await;
    controller.load_playlist(new_id, urls(&["b", "c"]));
    controller.start().await.unwrap();

    controller.handle_event(PlaybackEvent::finished(old_id)).await.unwrap();
    controller.handle_event(PlaybackEvent::error(old_id, transient())).await.unwrap();

    assert_eq!(controller.state(), PlaybackState::Playing(0));
    assert_eq!(controller.player().attempts(&sign_url("b")), 1);
}

#[tokio::test]
async fn test_pauseAndSkipForward_shouldKeepPausedState() {
    let mut controller = PlaybackController::new(ScriptedMediaPlayer::new(), &quick_playback());
    controller.load_playlist(Uuid::new_v4(), urls(&["a", "b"]));
    controller.start().await.unwrap();

    controller.pause().await.unwrap();
    assert_eq!(controller.state(), PlaybackState::Paused(0));

    controller.skip_forward().await.unwrap();
    assert_eq!(controller.state(), PlaybackState::Paused(1));

    controller.skip_forward().await.unwrap();
    assert_eq!(controller.current_index(), 1);

    controller.toggle().await.unwrap();
    assert_eq!(controller.state(), PlaybackState::Playing(1));
}

#[tokio::test]
async fn test_restart_shouldReplayFromFirstClip() {
    let id = Uuid::new_v4();
    let mut controller = PlaybackController::new(ScriptedMediaPlayer::new(), &quick_playback());
    controller.load_playlist(id, urls(&["a", "b"]));
    controller.start().await.unwrap();
    controller.handle_event(PlaybackEvent::finished(id)).await.unwrap();
    controller.handle_event(PlaybackEvent::finished(id)).await.unwrap();
    assert_eq!(controller.state(), PlaybackState::Finished);

    controller.restart().await.unwrap();

    assert_eq!(controller.state(), PlaybackState::Playing(0));
    assert_eq!(controller.player().attempts(&sign_url("a")), 2);
}

#[tokio::test]
async fn test_load_shouldPassConfiguredPlaybackRate() {
    let mut controller = PlaybackController::new(ScriptedMediaPlayer::new(), &quick_playback());
    controller.load_playlist(Uuid::new_v4(), urls(&["a"]));
    controller.start().await.unwrap();

    assert_eq!(controller.player().rates(), &[1.5]);
}

#[tokio::test]
async fn test_start_withEmptyPlaylist_shouldFail() {
    let mut controller = PlaybackController::new(ScriptedMediaPlayer::new(), &quick_playback());
    controller.load_playlist(Uuid::new_v4(), Vec::new());

    assert_eq!(controller.start().await, Err(PlaybackError::EmptyPlaylist));
    assert_eq!(controller.state(), PlaybackState::Idle);
}

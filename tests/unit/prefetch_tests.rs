/*!
 * Tests for the prefetch cache
 */

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use signbridge::app_config::PrefetchConfig;
use signbridge::playlist::PlayableClip;
use signbridge::prefetch::{CacheState, PrefetchCache};

use crate::common::{CountingProbe, sign_url};

fn clips(names: &[&str]) -> Vec<PlayableClip> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| PlayableClip {
            url: sign_url(name),
            item_index: i,
            cache_key: name.to_string(),
        })
        .collect()
}

fn quick_prefetch() -> PrefetchConfig {
    PrefetchConfig {
        stagger_ms: 1,
        max_wait_ms: 1000,
        ..PrefetchConfig::default()
    }
}

#[tokio::test]
async fn test_prime_withSameKeyConcurrently_shouldCreateOneEntry() {
    let probe = Arc::new(CountingProbe::new().with_delay(Duration::from_millis(5)));
    let cache = PrefetchCache::new(probe.clone());
    let url = sign_url("hello");

    let tasks = (0..16).map(|_| {
        let cache = cache.clone();
        let url = url.clone();
        tokio::spawn(async move { cache.prime(&url, "hello") })
    });
    let handles: Vec<_> = join_all(tasks).await.into_iter().filter_map(|r| r.ok().flatten()).collect();

    assert_eq!(handles.len(), 1);
    assert_eq!(cache.len(), 1);
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(probe.calls(), 1);
    assert_eq!(cache.state("hello"), Some(CacheState::Loaded));
}

#[tokio::test]
async fn test_prime_withFailingProbe_shouldEvictEntry() {
    let url = sign_url("ghost");
    let probe = Arc::new(CountingProbe::new().failing(&url));
    let cache = PrefetchCache::new(probe);

    let handle = cache.prime(&url, "ghost").expect("first prime spawns a probe");
    assert!(!handle.await.unwrap());

    assert_eq!(cache.state("ghost"), None);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_prime_withEmptyUrl_shouldDoNothing() {
    let probe = Arc::new(CountingProbe::new());
    let cache = PrefetchCache::new(probe.clone());

    assert!(cache.prime("", "blank").is_none());
    assert!(cache.is_empty());
    assert_eq!(probe.calls(), 0);
}

#[tokio::test]
async fn test_primeSequence_withHealthyClips_shouldBecomeReady() {
    let probe = Arc::new(CountingProbe::new());
    let cache = PrefetchCache::new(probe.clone());

    let readiness = cache.prime_sequence(&clips(&["a", "b", "c", "d"]), &quick_prefetch());

    assert!(readiness.wait_ready().await);
    assert_eq!(readiness.total(), 4);
    assert!(readiness.progress() >= 95.0);
    assert_eq!(cache.len(), 4);
}

#[tokio::test]
async fn test_primeSequence_withFailedClip_shouldSettleBelowThreshold() {
    let probe = Arc::new(CountingProbe::new().failing(&sign_url("b")));
    let cache = PrefetchCache::new(probe);

    let readiness = cache.prime_sequence(&clips(&["a", "b"]), &quick_prefetch());

    assert!(!readiness.wait_ready().await);
    assert_eq!(readiness.loaded(), 1);
    assert_eq!(cache.state("b"), None);
    assert_eq!(cache.state("a"), Some(CacheState::Loaded));
}

#[tokio::test]
async fn test_primeSequence_withSlowProbes_shouldStopAtMaxWait() {
    let probe = Arc::new(CountingProbe::new().with_delay(Duration::from_millis(500)));
    let cache = PrefetchCache::new(probe);
    let config = PrefetchConfig {
        stagger_ms: 0,
        max_wait_ms: 20,
        ..PrefetchConfig::default()
    };

    let readiness = cache.prime_sequence(&clips(&["a", "b"]), &config);

    assert!(!readiness.wait_ready().await);
    assert_eq!(readiness.loaded(), 0);
}

#[tokio::test]
async fn test_clear_shouldDropEveryEntry() {
    let cache = PrefetchCache::new(Arc::new(CountingProbe::new()));
    let readiness = cache.prime_sequence(&clips(&["a", "b"]), &quick_prefetch());
    readiness.wait_ready().await;

    cache.clear();

    assert!(cache.is_empty());
}

/*!
 * Process-wide prefetch cache for sign videos.
 *
 * One instance is created at startup and shared (cheaply cloned) by every
 * request. Entries are keyed by the word or letter a clip stands for. The
 * check for an existing key and the insertion of a `Loading` entry happen
 * under a single lock acquisition, so concurrent primes of the same key
 * create exactly one entry and issue exactly one probe. Entries only ever
 * leave the cache on probe failure or an explicit `clear`.
 */

use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, timeout_at};

use super::probe::{AssetProbe, HttpProbe};
use crate::app_config::PrefetchConfig;
use crate::playlist::PlayableClip;

/// Loading state of a cached asset. Absent assets have no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Loading,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub url: String,
    pub state: CacheState,
}

/// Shared cache of primed video assets
#[derive(Clone)]
pub struct PrefetchCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    probe: Arc<dyn AssetProbe>,
}

impl std::fmt::Debug for PrefetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefetchCache")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

impl PrefetchCache {
    pub fn new(probe: Arc<dyn AssetProbe>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            probe,
        }
    }

    /// Cache backed by HTTP HEAD probes
    pub fn with_http(config: &PrefetchConfig) -> Self {
        Self::new(Arc::new(HttpProbe::new(Duration::from_secs(config.probe_timeout_secs))))
    }

    /// Start probing `url` under `key` without waiting for the result.
    ///
    /// Returns `None` when the url is empty or the key is already cached,
    /// otherwise the handle of the spawned probe (`true` on success).
    /// Must be called from within a tokio runtime.
    pub fn prime(&self, url: &str, key: &str) -> Option<JoinHandle<bool>> {
        if url.trim().is_empty() || !self.try_insert(url, key) {
            return None;
        }

        let cache = self.clone();
        let url = url.to_string();
        let key = key.to_string();
        Some(tokio::spawn(async move { cache.run_probe(&url, &key).await }))
    }

    /// Prime every clip of a playable sequence, staggering the probes by
    /// position, and report readiness of the sequence as a whole
    pub fn prime_sequence(&self, clips: &[PlayableClip], config: &PrefetchConfig) -> PlaylistReadiness {
        let (tx, rx) = watch::channel(0usize);
        let tx = Arc::new(tx);

        for (index, clip) in clips.iter().enumerate() {
            let cache = self.clone();
            let tx = Arc::clone(&tx);
            let delay = config.stagger() * index as u32;
            let url = clip.url.clone();
            let key = clip.cache_key.clone();

            tokio::spawn(async move {
                if !delay.is_zero() {
                    sleep(delay).await;
                }

                let loaded = if url.trim().is_empty() {
                    false
                } else if cache.try_insert(&url, &key) {
                    cache.run_probe(&url, &key).await
                } else {
                    // Already primed or in flight
                    cache.state(&key).is_some()
                };

                if loaded {
                    tx.send_modify(|count| *count += 1);
                }
            });
        }

        PlaylistReadiness {
            total: clips.len(),
            loaded: rx,
            threshold_percent: config.ready_threshold_percent,
            deadline: Instant::now() + config.max_wait(),
        }
    }

    pub fn state(&self, key: &str) -> Option<CacheState> {
        self.entries.lock().get(key).map(|entry| entry.state)
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        debug!("Clearing prefetch cache ({} entries)", entries.len());
        entries.clear();
    }

    /// Insert a `Loading` entry unless the key exists. Returns whether it was inserted.
    fn try_insert(&self, url: &str, key: &str) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains_key(key) {
            return false;
        }
        entries.insert(
            key.to_string(),
            CacheEntry {
                url: url.to_string(),
                state: CacheState::Loading,
            },
        );
        true
    }

    async fn run_probe(&self, url: &str, key: &str) -> bool {
        match self.probe.probe(url).await {
            Ok(()) => {
                let mut entries = self.entries.lock();
                if let Some(entry) = entries.get_mut(key).filter(|entry| entry.url == url) {
                    entry.state = CacheState::Loaded;
                }
                debug!("Prefetched '{}'", key);
                true
            }
            Err(e) => {
                warn!("Prefetch of '{}' failed, evicting: {}", key, e);
                let mut entries = self.entries.lock();
                if entries.get(key).is_some_and(|entry| entry.url == url) {
                    entries.remove(key);
                }
                false
            }
        }
    }
}

/// Readiness of a primed playable sequence.
///
/// A sequence is ready once the share of successfully probed clips reaches
/// the threshold, or once the max wait has elapsed.
#[derive(Debug, Clone)]
pub struct PlaylistReadiness {
    total: usize,
    loaded: watch::Receiver<usize>,
    threshold_percent: f64,
    deadline: Instant,
}

impl PlaylistReadiness {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn loaded(&self) -> usize {
        *self.loaded.borrow()
    }

    /// Percentage of clips probed successfully
    pub fn progress(&self) -> f64 {
        percent(self.loaded(), self.total)
    }

    pub fn is_ready(&self) -> bool {
        self.progress() >= self.threshold_percent
    }

    /// Wait until the threshold is reached or the max wait elapses.
    ///
    /// Returns `true` if the threshold was reached. Returns `false` on
    /// timeout, or as soon as every probe has settled below the threshold.
    pub async fn wait_ready(&self) -> bool {
        let mut loaded = self.loaded.clone();
        let total = self.total;
        let threshold = self.threshold_percent;

        match timeout_at(self.deadline, loaded.wait_for(|count| percent(*count, total) >= threshold)).await {
            Ok(Ok(_)) => true,
            Ok(Err(_)) => {
                debug!("All probes settled at {:.0}% readiness", self.progress());
                false
            }
            Err(_) => {
                debug!("Readiness wait timed out at {:.0}%", self.progress());
                false
            }
        }
    }
}

fn percent(loaded: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (loaded as f64 * 100.0 / total as f64).min(100.0)
}

//! Media cache keyed by intent.
//!
//! Concurrent requests for the same intent share one discovery call; later
//! requests are served from memory.

use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use super::{MediaAsset, MediaDiscovery, MediaIntent};

#[derive(Debug)]
pub struct MediaCache {
    discovery: MediaDiscovery,
    entries: DashMap<MediaIntent, Arc<OnceCell<MediaAsset>>>,
    loading: DashSet<MediaIntent>,
    discoveries: AtomicUsize,
}

/// Marks an intent as loading for as long as its discovery future is alive.
struct LoadingGuard<'a> {
    loading: &'a DashSet<MediaIntent>,
    intent: MediaIntent,
}

impl<'a> LoadingGuard<'a> {
    fn new(loading: &'a DashSet<MediaIntent>, intent: MediaIntent) -> Self {
        loading.insert(intent);
        Self { loading, intent }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.remove(&self.intent);
    }
}

impl MediaCache {
    pub fn new(discovery: MediaDiscovery) -> Self {
        Self {
            discovery,
            entries: DashMap::new(),
            loading: DashSet::new(),
            discoveries: AtomicUsize::new(0),
        }
    }

    /// Cached asset, or discover it once and cache the result.
    pub async fn get_or_discover(&self, intent: MediaIntent) -> MediaAsset {
        // Clone the cell out so no map guard is held across the await
        let cell = self
            .entries
            .entry(intent)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        cell.get_or_init(|| async {
            let _loading = LoadingGuard::new(&self.loading, intent);
            self.discoveries.fetch_add(1, Ordering::Relaxed);
            debug!(%intent, "discovering media");
            self.discovery.discover_intent(intent).await
        })
        .await
        .clone()
    }

    /// Cached asset without triggering discovery.
    pub fn get(&self, intent: MediaIntent) -> Option<MediaAsset> {
        self.entries.get(&intent).and_then(|cell| cell.get().cloned())
    }

    /// Whether a discovery for this intent is running right now.
    ///
    /// A request dropped mid-discovery stops counting as loading; the next
    /// request for the intent starts a fresh discovery.
    pub fn is_loading(&self, intent: MediaIntent) -> bool {
        self.loading.contains(&intent)
    }

    /// Drop a cached asset so the next request discovers it again.
    ///
    /// A discovery already in flight for the old entry completes into the
    /// dropped cell and is ignored.
    pub fn invalidate(&self, intent: MediaIntent) {
        self.entries.remove(&intent);
    }

    /// Warm the cache for several intents.
    pub async fn preload(&self, intents: &[MediaIntent]) {
        for intent in intents {
            self.get_or_discover(*intent).await;
        }
    }

    /// Number of discovery calls made so far.
    pub fn discovery_count(&self) -> usize {
        self.discoveries.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.value().initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MediaCache {
    fn default() -> Self {
        Self::new(MediaDiscovery::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaType;
    use std::net::TcpListener;

    #[tokio::test]
    async fn test_caches_by_intent() {
        let cache = MediaCache::default();
        assert!(cache.get(MediaIntent::WebDevelopment).is_none());
        assert!(!cache.is_loading(MediaIntent::WebDevelopment));

        let first = cache.get_or_discover(MediaIntent::WebDevelopment).await;
        let second = cache.get_or_discover(MediaIntent::WebDevelopment).await;

        assert_eq!(first, second);
        assert_eq!(first.media_type, MediaType::Image);
        assert_eq!(cache.discovery_count(), 1);
        assert_eq!(cache.get(MediaIntent::WebDevelopment), Some(first));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_discovery() {
        let cache = Arc::new(MediaCache::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get_or_discover(MediaIntent::HeroAbstractTech).await })
            })
            .collect();

        let mut assets = Vec::new();
        for handle in handles {
            assets.push(handle.await.unwrap());
        }

        assert!(assets.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(cache.discovery_count(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_rediscovery() {
        let cache = MediaCache::default();
        cache.get_or_discover(MediaIntent::ProcessDesign).await;

        cache.invalidate(MediaIntent::ProcessDesign);
        assert!(cache.get(MediaIntent::ProcessDesign).is_none());

        cache.get_or_discover(MediaIntent::ProcessDesign).await;
        assert_eq!(cache.discovery_count(), 2);
    }

    #[tokio::test]
    async fn test_preload() {
        let cache = MediaCache::default();
        cache
            .preload(&[MediaIntent::AiAutomation, MediaIntent::SystemMigration])
            .await;
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_discovery_is_not_loading() {
        // Accepts connections into the backlog but never answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/videos/search", listener.local_addr().unwrap());
        let discovery = MediaDiscovery::new(Some("test-key".to_string())).with_pexels_endpoint(endpoint);
        let cache = Arc::new(MediaCache::new(discovery));

        let pending = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_or_discover(MediaIntent::HeroAbstractTech).await })
        };

        for _ in 0..1_000 {
            if cache.is_loading(MediaIntent::HeroAbstractTech) {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(cache.is_loading(MediaIntent::HeroAbstractTech));

        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());

        assert!(!cache.is_loading(MediaIntent::HeroAbstractTech));
        assert!(cache.get(MediaIntent::HeroAbstractTech).is_none());
        assert_eq!(cache.discovery_count(), 1);
    }
}

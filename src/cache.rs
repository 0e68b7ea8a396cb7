//! Garment image caching
//!
//! Background removal is a full-image pixel scan and is always invoked
//! against a small fixed set of catalog photos (front/back per garment
//! type), so results are memoized. The cache is an explicit object injected
//! into the renderer rather than ambient global state, keyed by a stable
//! source identifier. Entries are immutable once written and are never
//! invalidated within the process lifetime; catalog images are assumed
//! static for the session.
//!
//! Concurrent requests for a not-yet-cached key coalesce into a single
//! in-flight computation; later callers await the same result. A failed
//! computation is not cached, so the key can be retried.

use crate::chroma_key;
use crate::config::ChromaKeyConfig;
use crate::error::Result;
use crate::source::{GarmentFetcher, GarmentSource};
use futures::future::join_all;
use image::RgbaImage;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Cache statistics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of completed entries
    pub entries: usize,
    /// Lookups answered from a completed entry
    pub hits: u64,
    /// Lookups that had to compute (or wait on an in-flight computation)
    pub misses: u64,
}

/// Memoization cache for background-removed garment images
#[derive(Default)]
pub struct GarmentCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<Arc<RgbaImage>>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GarmentCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a completed entry without computing anything
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<RgbaImage>> {
        let entries = self.entries.lock().expect("garment cache lock poisoned");
        entries.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Return the cached value for `key`, computing it at most once.
    ///
    /// All concurrent callers for the same vacant key share one in-flight
    /// `compute` invocation. The pixel scan inside `compute` is synchronous
    /// CPU work; the await points are only image fetch/decode.
    ///
    /// # Errors
    ///
    /// Propagates the error from `compute`; the key stays vacant so a later
    /// call can retry.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> Result<Arc<RgbaImage>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RgbaImage>>,
    {
        let cell = {
            let mut entries = self.entries.lock().expect("garment cache lock poisoned");
            entries
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        if let Some(value) = cell.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value.clone());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let value = cell
            .get_or_try_init(|| async { compute().await.map(Arc::new) })
            .await?;
        Ok(value.clone())
    }

    /// Fetch a garment source and remove its backdrop, memoized by the
    /// source's cache key.
    ///
    /// # Errors
    ///
    /// Propagates fetch (`Load`), decode (`Decode`), and removal errors.
    pub async fn remove_background_cached(
        &self,
        source: &GarmentSource,
        fetcher: &dyn GarmentFetcher,
        config: &ChromaKeyConfig,
    ) -> Result<Arc<RgbaImage>> {
        self.get_or_compute(&source.cache_key(), || async {
            let image = fetcher.fetch(source).await?;
            Ok(chroma_key::remove_background(&image, config))
        })
        .await
    }

    /// Warm the cache for a set of catalog garments.
    ///
    /// Sources are processed concurrently; a failing source is reported in
    /// the returned list (and logged) without aborting the others.
    pub async fn preload_all(
        &self,
        sources: &[GarmentSource],
        fetcher: &dyn GarmentFetcher,
        config: &ChromaKeyConfig,
    ) -> Vec<(String, Result<()>)> {
        let preloads = sources.iter().map(|source| async move {
            let key = source.cache_key();
            let result = self
                .remove_background_cached(source, fetcher, config)
                .await
                .map(|_| ());
            if let Err(ref e) = result {
                log::warn!("Failed to preload garment '{}': {}", key, e);
            }
            (key, result)
        });

        join_all(preloads).await
    }

    /// Number of completed entries
    #[must_use]
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().expect("garment cache lock poisoned");
        entries.values().filter(|cell| cell.initialized()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runtime statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop all entries and reset statistics
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("garment cache lock poisoned");
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

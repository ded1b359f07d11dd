//! Shared read-only record-store cache keyed by source file identity.
//!
//! Sessions recompute summaries constantly but the base table only changes
//! when the source file does, so stores are cached behind an `Arc` and
//! re-loaded only when the file's fingerprint (length + mtime) moves.

use crate::store::{CsvIngestOptions, RecordStore};
use callboard_common::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceFingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceFingerprint {
    fn probe(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Loads served from a cached store.
    pub hits: u64,
    /// Loads that had to read the source file.
    pub misses: u64,
    /// Number of cached stores.
    pub entries: usize,
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: SourceFingerprint,
    store: Arc<RecordStore>,
}

/// Cache of loaded record stores, keyed by source path.
#[derive(Debug, Default)]
pub struct StoreCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StoreCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached store for `path`, re-loading it only if the source
    /// file changed since it was last read.
    pub fn load(
        &self,
        path: impl AsRef<Path>,
        options: &CsvIngestOptions,
    ) -> Result<Arc<RecordStore>> {
        let path = path.as_ref();
        let fingerprint = SourceFingerprint::probe(path)?;

        if let Some(entry) = self.entries.read().get(path) {
            if entry.fingerprint == fingerprint {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(path = %path.display(), "record store cache hit");
                return Ok(Arc::clone(&entry.store));
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        info!(path = %path.display(), "record store cache miss, reading source");
        let store = Arc::new(RecordStore::load_csv_with(path, options)?);
        self.entries.write().insert(
            path.to_path_buf(),
            CacheEntry {
                fingerprint,
                store: Arc::clone(&store),
            },
        );
        Ok(store)
    }

    /// Drops the cached store for `path`, if any.
    pub fn invalidate(&self, path: impl AsRef<Path>) {
        self.entries.write().remove(path.as_ref());
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.read().len(),
        }
    }
}

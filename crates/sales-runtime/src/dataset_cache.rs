//! Memoized dataset loading.
//!
//! [`DatasetCache`] loads each CSV file at most once and hands out shared
//! [`Arc<Dataset>`] handles afterwards. The cache is an ordinary value owned by
//! the application context; create one per process and pass it around.
//!
//! Concurrent first requests for the same file are serialized through a
//! per-path [`OnceCell`], so only one of them performs the load. A failed load
//! leaves the cell empty and the next request tries again.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;
use sales_core::error::{Result, SalesError};
use sales_data::dataset::Dataset;

type Slot = Arc<OnceCell<Arc<Dataset>>>;

// ── DatasetCache ──────────────────────────────────────────────────────────────

/// Thread-safe, lazily-populated cache of loaded datasets keyed by path.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use sales_runtime::dataset_cache::DatasetCache;
///
/// let cache = DatasetCache::new();
/// let first = cache.get_or_load(Path::new("Bakery sales.csv"))?;
/// let again = cache.get_or_load(Path::new("Bakery sales.csv"))?;
/// assert!(std::sync::Arc::ptr_eq(&first, &again));
/// # Ok::<(), sales_core::SalesError>(())
/// ```
#[derive(Debug, Default)]
pub struct DatasetCache {
    slots: Mutex<HashMap<PathBuf, Slot>>,
    /// Number of loads actually performed, successful or not.
    loads: AtomicUsize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the dataset for `path`, loading it on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>> {
        let key = cache_key(path);
        let slot = self.slot(&key);

        let dataset = slot.get_or_try_init(|| {
            self.loads.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(path = %key.display(), "dataset cache miss; loading");
            Dataset::load(path).map(Arc::new)
        })?;

        Ok(Arc::clone(dataset))
    }

    /// Like [`get_or_load`](Self::get_or_load), but performs the load on
    /// tokio's blocking thread pool.
    pub async fn get_or_load_async(self: &Arc<Self>, path: PathBuf) -> Result<Arc<Dataset>> {
        let cache = Arc::clone(self);
        tokio::task::spawn_blocking(move || cache.get_or_load(&path))
            .await
            .map_err(|e| SalesError::Io(std::io::Error::other(e)))?
    }

    /// Forget the dataset for `path`. Returns `true` when an entry existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        let key = cache_key(path);
        let removed = self.lock().remove(&key).is_some();
        if removed {
            tracing::debug!(path = %key.display(), "dataset cache entry invalidated");
        }
        removed
    }

    /// `true` when a loaded dataset for `path` is held.
    pub fn is_cached(&self, path: &Path) -> bool {
        let key = cache_key(path);
        self.lock()
            .get(&key)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of loaded datasets held.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of load attempts performed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Fetch or create the once-cell for `key`. The map lock is released
    /// before the cell is initialized, so loads of different files do not
    /// block each other.
    fn slot(&self, key: &Path) -> Slot {
        Arc::clone(self.lock().entry(key.to_path_buf()).or_default())
    }

    /// The map only holds once-cells, which a panicking holder cannot leave
    /// half-written, so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Identity of an input file: its canonical path when it exists, otherwise the
/// path as given.
fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

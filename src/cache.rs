use crate::structs::CaptureMetadata;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Identifies one version of a file: a rewrite changes the modification time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl FileKey {
    pub async fn for_path(path: &Path) -> Option<Self> {
        let modified = tokio::fs::metadata(path).await.ok()?.modified().ok()?;
        Some(Self {
            path: path.to_path_buf(),
            modified,
        })
    }
}

/// Read-through LRU cache of extracted metadata.
pub struct MetadataCache {
    entries: Mutex<LruCache<FileKey, CaptureMetadata>>,
}

impl MetadataCache {
    /// Returns `None` for a capacity of zero (caching disabled).
    pub fn new(capacity: usize) -> Option<Self> {
        let capacity = NonZeroUsize::new(capacity)?;
        Some(Self {
            entries: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn get(&self, key: &FileKey) -> Option<CaptureMetadata> {
        self.entries.lock().get(key).cloned()
    }

    /// Stores `metadata` only if it is complete, so a failed geocode is retried
    /// on a later request instead of being pinned.
    pub fn insert(&self, key: FileKey, metadata: &CaptureMetadata) {
        if metadata.is_complete() {
            self.entries.lock().put(key, metadata.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

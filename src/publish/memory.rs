//! In-process store implementations.
//!
//! Both stores keep everything in memory behind a `tokio::sync::Mutex` and
//! can be told to fail, which makes them useful for embedding the publisher
//! in tests or offline builds.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use rustc_hash::{FxHashMap, FxHashSet};
use tokio::sync::Mutex;

use super::error::StoreError;
use super::store::{BlobStore, DeckRecord, DocumentStore, StoreFuture};

/// Document store backed by a hash map keyed by `(collection, key)`.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    records: Mutex<FxHashMap<(String, String), DeckRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record directly, bypassing failure injection.
    pub async fn insert(&self, collection: &str, key: &str, record: DeckRecord) {
        self.records
            .lock()
            .await
            .insert((collection.to_string(), key.to_string()), record);
    }

    /// Read a record directly, bypassing failure injection.
    pub async fn record(&self, collection: &str, key: &str) -> Option<DeckRecord> {
        self.records
            .lock()
            .await
            .get(&(collection.to_string(), key.to_string()))
            .cloned()
    }

    /// Make every `get` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every `set` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `set` calls, including failed ones.
    #[must_use]
    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get<'a>(&'a self, collection: &'a str, key: &'a str) -> StoreFuture<'a, Option<DeckRecord>> {
        Box::pin(async move {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("reads disabled".into()));
            }
            Ok(self.record(collection, key).await)
        })
    }

    fn set<'a>(&'a self, collection: &'a str, key: &'a str, record: DeckRecord) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Rejected("writes disabled".into()));
            }
            self.insert(collection, key, record).await;
            Ok(())
        })
    }
}

/// Blob store backed by a hash map keyed by path.
///
/// Download URLs are `{base_url}/{path}`.
#[derive(Debug)]
pub struct MemoryBlobStore {
    base_url: String,
    blobs: Mutex<FxHashMap<String, Vec<u8>>>,
    failing: Mutex<FxHashSet<String>>,
    latency: Option<Duration>,
    puts: AtomicUsize,
    fail_download_urls: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            blobs: Mutex::new(FxHashMap::default()),
            failing: Mutex::new(FxHashSet::default()),
            latency: None,
            puts: AtomicUsize::new(0),
            fail_download_urls: AtomicBool::new(false),
        }
    }

    /// Delay every successful `put` by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail every `put` whose path ends with `suffix`. Failures are immediate.
    pub async fn fail_paths_ending_with(&self, suffix: &str) {
        self.failing.lock().await.insert(suffix.to_string());
    }

    /// Make `download_url` report the store as unavailable. Puts still land.
    pub fn set_fail_download_urls(&self, fail: bool) {
        self.fail_download_urls.store(fail, Ordering::SeqCst);
    }

    /// Number of `put` calls, including failed ones.
    #[must_use]
    pub fn put_attempts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Paths of stored blobs, sorted.
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.blobs.lock().await.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Contents of the blob at `path`.
    pub async fn blob(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.lock().await.get(path).cloned()
    }

    async fn should_fail(&self, path: &str) -> bool {
        self.failing.lock().await.iter().any(|suffix| path.ends_with(suffix.as_str()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn put<'a>(&'a self, path: &'a str, bytes: Vec<u8>) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if self.should_fail(path).await {
                return Err(StoreError::Rejected(format!("upload refused for {}", path)));
            }
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.blobs.lock().await.insert(path.to_string(), bytes);
            Ok(())
        })
    }

    fn download_url<'a>(&'a self, path: &'a str) -> StoreFuture<'a, String> {
        Box::pin(async move {
            if self.fail_download_urls.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable(format!("no download url for {}", path)));
            }
            if !self.blobs.lock().await.contains_key(path) {
                return Err(StoreError::NotFound(path.to_string()));
            }
            Ok(format!("{}/{}", self.base_url, path))
        })
    }
}

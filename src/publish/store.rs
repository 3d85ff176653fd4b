//! Store collaborator traits.
//!
//! Implementations bridge to whatever backend holds decks. Using traits keeps
//! the publishing pipeline decoupled from transport and testable with the
//! in-memory stores.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// Boxed future returned by store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// The document stored under a deck name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    /// Download URLs of the deck's images, one per pair.
    #[serde(default)]
    pub images: Vec<String>,
}

impl DeckRecord {
    /// Create a record from image URLs.
    #[must_use]
    pub fn new(images: Vec<String>) -> Self {
        Self { images }
    }
}

/// Key-value document store holding deck records.
pub trait DocumentStore: Send + Sync {
    /// Read the record stored under `key`. `Ok(None)` when there is none.
    fn get<'a>(&'a self, collection: &'a str, key: &'a str) -> StoreFuture<'a, Option<DeckRecord>>;

    /// Write (or overwrite) the record stored under `key`.
    fn set<'a>(&'a self, collection: &'a str, key: &'a str, record: DeckRecord) -> StoreFuture<'a, ()>;
}

/// Blob store holding uploaded images.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `path`.
    fn put<'a>(&'a self, path: &'a str, bytes: Vec<u8>) -> StoreFuture<'a, ()>;

    /// Public download URL of the blob at `path`.
    fn download_url<'a>(&'a self, path: &'a str) -> StoreFuture<'a, String>;
}

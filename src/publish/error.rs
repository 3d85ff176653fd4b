//! Deck publishing error types.

/// Failure reported by a document or blob store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("not found: {0}")]
    NotFound(String),
}

/// Failure reported by the image codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("cannot decode image: {0}")]
    Decode(String),

    #[error("cannot encode image: {0}")]
    Encode(String),
}

/// Errors produced while drafting, publishing or fetching a deck.
///
/// Every publishing error is terminal for its job; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("a deck named '{0}' already exists")]
    NameTaken(String),

    #[error("deck store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    #[error("failed to upload image {index}: {reason}")]
    UploadFailed { index: usize, reason: String },

    #[error("failed to write deck record: {0}")]
    RecordWriteFailed(#[source] StoreError),

    #[error("invalid deck name '{0}'")]
    InvalidName(String),

    #[error("expected {expected} images, got {actual}")]
    WrongImageCount { expected: usize, actual: usize },

    #[error("no deck named '{0}'")]
    DeckNotFound(String),

    #[error("deck '{name}' has {images} images, which fits no board size")]
    UnsupportedDeckSize { name: String, images: usize },
}

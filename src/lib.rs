//! # memory-match
//!
//! A memory-matching (concentration) game engine with a pipeline for
//! publishing and downloading custom photo decks.
//!
//! ## Design Principles
//!
//! 1. **Single Owner**: The board owns its cards. Callers address cards by
//!    position and read them through accessors.
//!
//! 2. **Configuration Over Globals**: Icon tables and publishing knobs are
//!    passed in, never read from ambient state.
//!
//! 3. **Collaborators Behind Traits**: Document store, blob store and image
//!    codec are traits, so the pipeline runs the same against a cloud
//!    backend or the in-memory stores.
//!
//! ## Modules
//!
//! - `core`: RNG, board sizes, icon tables, publishing configuration
//! - `cards`: Card faces and card state
//! - `board`: Flip/match/restore state machine and win detection
//! - `session`: Game controller guarding the board for a UI
//! - `publish`: Deck drafts, the upload pipeline, deck download

pub mod board;
pub mod cards;
pub mod core;
pub mod publish;
pub mod session;

// Re-export commonly used types
pub use crate::core::{BoardSize, GameRng, IconDef, IconTable, PublishConfig};

pub use crate::cards::{Card, CardFace};

pub use crate::board::{Board, BoardError, BoardStatus, FlipOutcome, Selection};

pub use crate::session::GameSession;

pub use crate::publish::{
    fetch_deck, BlobStore, CodecError, CustomDeck, DeckDraft, DeckError, DeckPublisher,
    DeckRecord, DocumentStore, ImageCodec, ImageHandle, MemoryBlobStore, MemoryDocumentStore,
    PublishEvent, PublishJob, PublishStage, RasterImage, StoreError,
};

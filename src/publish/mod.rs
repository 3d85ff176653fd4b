//! Custom deck publishing and download.
//!
//! Publishing turns a set of local photos into a named deck:
//!
//! 1. **NameCheck** — make sure no record exists under the name
//! 2. **Uploading** — encode and upload every image concurrently
//! 3. **Aggregating** — collect download URLs as uploads complete
//! 4. **Recording** — write `{name → urls}` once every image is in
//!
//! The stores and the image codec are collaborators behind traits; this
//! module only shapes what is handed to them. `memory` has in-process
//! implementations of both stores.

pub mod codec;
pub mod draft;
pub mod error;
pub mod fetch;
pub mod memory;
pub mod publisher;
pub mod store;

pub use codec::{encode_for_upload, scaled_dimensions, ImageCodec, ImageHandle, RasterImage};
pub use draft::{DeckDraft, PublishJob};
pub use error::{CodecError, DeckError, StoreError};
pub use fetch::{fetch_deck, CustomDeck};
pub use memory::{MemoryBlobStore, MemoryDocumentStore};
pub use publisher::{DeckPublisher, PublishEvent, PublishStage};
pub use store::{BlobStore, DeckRecord, DocumentStore, StoreFuture};

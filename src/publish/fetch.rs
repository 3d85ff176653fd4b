//! Downloading a published deck by name.

use tracing::{info, warn};

use super::error::DeckError;
use super::store::DocumentStore;
use crate::cards::CardFace;
use crate::core::{BoardSize, PublishConfig};

/// A published deck ready to be dealt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomDeck {
    pub name: String,
    /// Board size implied by the image count (two cards per image).
    pub size: BoardSize,
    pub images: Vec<CardFace>,
}

/// Fetch the deck stored under `name`.
///
/// The name is trimmed first. A missing record and a record without images
/// are both reported as `DeckNotFound`.
pub async fn fetch_deck(
    store: &dyn DocumentStore,
    config: &PublishConfig,
    name: &str,
) -> Result<CustomDeck, DeckError> {
    let name = name.trim();
    let record = store
        .get(&config.collection, name)
        .await
        .map_err(DeckError::StoreUnavailable)?;

    let Some(record) = record.filter(|r| !r.images.is_empty()) else {
        warn!(deck = %name, "no such deck");
        return Err(DeckError::DeckNotFound(name.to_string()));
    };

    let size = BoardSize::from_card_count(record.images.len() * 2).ok_or_else(|| {
        DeckError::UnsupportedDeckSize {
            name: name.to_string(),
            images: record.images.len(),
        }
    })?;

    info!(deck = %name, size = ?size, "fetched custom deck");
    Ok(CustomDeck {
        name: name.to_string(),
        size,
        images: record.images.into_iter().map(CardFace::Url).collect(),
    })
}

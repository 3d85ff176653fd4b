//! Card face identifiers.
//!
//! Two cards whose faces compare equal form a pair. Built-in decks use small
//! icon tags; custom decks use the download URL of each uploaded image.

use serde::{Deserialize, Serialize};

/// What a card shows when face up.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Built-in icon, identified by its tag in an `IconTable`.
    Icon(u16),
    /// Custom image, identified by its URL.
    Url(String),
}

impl CardFace {
    /// Create a custom image face.
    pub fn url(url: impl Into<String>) -> Self {
        CardFace::Url(url.into())
    }

    /// Icon tag, if this is a built-in icon.
    #[must_use]
    pub fn as_icon(&self) -> Option<u16> {
        match self {
            CardFace::Icon(id) => Some(*id),
            CardFace::Url(_) => None,
        }
    }

    /// Image URL, if this is a custom image.
    #[must_use]
    pub fn as_url(&self) -> Option<&str> {
        match self {
            CardFace::Url(url) => Some(url),
            CardFace::Icon(_) => None,
        }
    }
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFace::Icon(id) => write!(f, "Icon({})", id),
            CardFace::Url(url) => write!(f, "Url({})", url),
        }
    }
}

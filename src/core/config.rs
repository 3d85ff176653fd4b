//! Game configuration types.
//!
//! - `BoardSize`: The fixed board layouts (card count and grid width)
//! - `IconTable`: The built-in card faces used when no custom deck is loaded
//! - `PublishConfig`: Knobs for publishing custom decks
//!
//! Configuration is passed in explicitly; nothing here is ambient global state.

use serde::{Deserialize, Serialize};

use crate::cards::CardFace;

/// Board layout. Each size fixes the number of cards and grid columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    /// 8 cards in 2 columns.
    #[default]
    Easy,
    /// 18 cards in 3 columns.
    Medium,
    /// 24 cards in 4 columns.
    Hard,
}

impl BoardSize {
    /// Every size, smallest first.
    pub const ALL: [BoardSize; 3] = [BoardSize::Easy, BoardSize::Medium, BoardSize::Hard];

    /// Total number of cards on the board.
    #[must_use]
    pub const fn total_cards(self) -> usize {
        match self {
            BoardSize::Easy => 8,
            BoardSize::Medium => 18,
            BoardSize::Hard => 24,
        }
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn columns(self) -> usize {
        match self {
            BoardSize::Easy => 2,
            BoardSize::Medium => 3,
            BoardSize::Hard => 4,
        }
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(self) -> usize {
        self.total_cards() / self.columns()
    }

    /// Number of pairs to find.
    #[must_use]
    pub const fn pairs(self) -> usize {
        self.total_cards() / 2
    }

    /// Look up the size with exactly `total_cards` cards.
    #[must_use]
    pub fn from_card_count(total_cards: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.total_cards() == total_cards)
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BoardSize::Easy => "Easy",
            BoardSize::Medium => "Medium",
            BoardSize::Hard => "Hard",
        };
        write!(f, "{}: {} x {}", name, self.rows(), self.columns())
    }
}

/// A named built-in icon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDef {
    /// Tag stored on the card (`CardFace::Icon`).
    pub id: u16,
    /// Resource name for the presentation layer.
    pub name: String,
}

/// Immutable table of built-in icons.
///
/// Sessions receive one of these at construction instead of reaching for a
/// global list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconTable {
    /// Table name (for debugging/display).
    pub name: String,
    icons: Vec<IconDef>,
}

const DEFAULT_ICON_NAMES: [&str; 12] = [
    "ic_face",
    "ic_flower",
    "ic_gift",
    "ic_heart",
    "ic_home",
    "ic_lightning",
    "ic_moon",
    "ic_plane",
    "ic_school",
    "ic_send",
    "ic_star",
    "ic_work",
];

impl IconTable {
    /// Create a table from icon names. Tags are assigned in order from 0.
    pub fn new<I, S>(name: impl Into<String>, icon_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let icons = icon_names
            .into_iter()
            .zip(0u16..)
            .map(|(icon, id)| IconDef { id, name: icon.into() })
            .collect();
        Self { name: name.into(), icons }
    }

    /// All icons in tag order.
    #[must_use]
    pub fn icons(&self) -> &[IconDef] {
        &self.icons
    }

    /// Number of icons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Whether the table has no icons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Resource name for an icon tag.
    #[must_use]
    pub fn name_of(&self, id: u16) -> Option<&str> {
        self.icons.iter().find(|icon| icon.id == id).map(|icon| icon.name.as_str())
    }

    /// Card faces for every icon.
    #[must_use]
    pub fn faces(&self) -> Vec<CardFace> {
        self.icons.iter().map(|icon| CardFace::Icon(icon.id)).collect()
    }
}

impl Default for IconTable {
    /// The twelve stock icons; enough for the largest board.
    fn default() -> Self {
        Self::new("default", DEFAULT_ICON_NAMES)
    }
}

/// Configuration for publishing and fetching custom decks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Document collection holding deck records.
    pub collection: String,

    /// Blob path prefix for uploaded images.
    pub image_prefix: String,

    /// Uploaded images are scaled to this height (pixels), keeping aspect ratio.
    pub target_height: u32,

    /// JPEG quality (0-100) for uploaded images.
    pub jpeg_quality: u8,

    /// Shortest accepted deck name.
    pub min_name_len: usize,

    /// Longest accepted deck name.
    pub max_name_len: usize,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            collection: "games".to_string(),
            image_prefix: "images".to_string(),
            target_height: 250,
            jpeg_quality: 60,
            min_name_len: 3,
            max_name_len: 14,
        }
    }
}

impl PublishConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document collection.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the blob path prefix.
    #[must_use]
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_prefix = prefix.into();
        self
    }

    /// Set the upload image height and JPEG quality.
    #[must_use]
    pub fn with_encoding(mut self, target_height: u32, jpeg_quality: u8) -> Self {
        self.target_height = target_height;
        self.jpeg_quality = jpeg_quality.min(100);
        self
    }

    /// Set the accepted deck name length range.
    #[must_use]
    pub fn with_name_bounds(mut self, min: usize, max: usize) -> Self {
        assert!(min <= max, "Minimum name length must not exceed maximum");
        self.min_name_len = min;
        self.max_name_len = max;
        self
    }

    /// Check whether `name` is an acceptable deck name.
    ///
    /// The name is trimmed first; blank names are always rejected.
    #[must_use]
    pub fn is_valid_name(&self, name: &str) -> bool {
        let name = name.trim();
        let len = name.chars().count();
        !name.is_empty() && len >= self.min_name_len && len <= self.max_name_len
    }
}

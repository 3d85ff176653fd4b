//! Deck drafts: collecting a name and images before publishing.

use super::codec::ImageHandle;
use super::error::DeckError;
use crate::core::{BoardSize, PublishConfig};

/// A deck being assembled by the player.
///
/// Exactly one image per pair is needed; extra images are refused.
#[derive(Clone, Debug)]
pub struct DeckDraft {
    size: BoardSize,
    name: String,
    images: Vec<ImageHandle>,
    config: PublishConfig,
}

impl DeckDraft {
    /// Start an empty draft for `size`.
    #[must_use]
    pub fn new(size: BoardSize, config: PublishConfig) -> Self {
        Self {
            size,
            name: String::new(),
            images: Vec::with_capacity(size.pairs()),
            config,
        }
    }

    /// Set the deck name. Surrounding whitespace is dropped.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    /// Add images until the draft is full. Returns how many were accepted.
    pub fn add_images<I>(&mut self, images: I) -> usize
    where
        I: IntoIterator<Item = ImageHandle>,
    {
        let room = self.missing_images();
        let before = self.images.len();
        self.images.extend(images.into_iter().take(room));
        self.images.len() - before
    }

    /// Remove the image at `index`.
    pub fn remove_image(&mut self, index: usize) -> Option<ImageHandle> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// How many more images are needed.
    #[must_use]
    pub fn missing_images(&self) -> usize {
        self.size.pairs() - self.images.len()
    }

    /// Is the draft ready to publish?
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.images.len() == self.size.pairs() && self.config.is_valid_name(&self.name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn images(&self) -> &[ImageHandle] {
        &self.images
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Title for the picker screen, e.g. `"Choose images (2 / 4)"`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Choose images ({} / {})", self.images.len(), self.size.pairs())
    }

    /// Turn the draft into a publish job.
    pub fn into_job(self) -> Result<PublishJob, DeckError> {
        if !self.config.is_valid_name(&self.name) {
            return Err(DeckError::InvalidName(self.name));
        }
        if self.images.len() != self.size.pairs() {
            return Err(DeckError::WrongImageCount {
                expected: self.size.pairs(),
                actual: self.images.len(),
            });
        }
        Ok(PublishJob {
            name: self.name,
            size: self.size,
            images: self.images,
        })
    }
}

/// A validated request to publish one deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishJob {
    pub name: String,
    pub size: BoardSize,
    pub images: Vec<ImageHandle>,
}

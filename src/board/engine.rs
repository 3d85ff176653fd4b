//! Board state machine.
//!
//! ## Flip rules
//!
//! A board is either waiting for the first card of an attempt
//! (`Selection::None`) or holding one selected card (`Selection::One`).
//!
//! - With no selection, every unmatched face-up card is turned back down,
//!   then the target is turned up and selected.
//! - With one selection, the target is turned up and compared. A match marks
//!   both cards matched. A mismatch leaves both cards face up; they are
//!   turned down by the *next* flip so the player gets to see them.
//!
//! ```
//! use memory_match::board::{Board, FlipOutcome};
//! use memory_match::core::{BoardSize, GameRng, IconTable};
//!
//! let icons = IconTable::default();
//! let mut board = Board::new(BoardSize::Easy, &icons.faces(), &GameRng::new(7)).unwrap();
//!
//! let first = 0;
//! let partner = board.partner_of(first).unwrap();
//!
//! assert_eq!(board.flip(first), FlipOutcome::FlippedNoMatch);
//! assert_eq!(board.flip(partner), FlipOutcome::FlippedMatch);
//! assert_eq!(board.pairs_found(), 1);
//! assert_eq!(board.move_count(), 1);
//! ```

use rustc_hash::FxHashSet;
use tracing::debug;

use super::error::BoardError;
use crate::cards::{Card, CardFace};
use crate::core::{BoardSize, GameRng};

/// Result of a flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The flip was rejected; the board is unchanged.
    Invalid,
    /// The card was turned up without completing a pair.
    FlippedNoMatch,
    /// The card was turned up and completed a pair.
    FlippedMatch,
}

/// Selection cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Waiting for the first card of an attempt.
    #[default]
    None,
    /// One card is face up waiting for its partner flip.
    One(usize),
}

/// Snapshot of the counters shown next to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardStatus {
    pub moves: usize,
    pub pairs_found: usize,
    pub pairs: usize,
    pub won: bool,
}

/// A memory board.
#[derive(Clone, Debug)]
pub struct Board {
    size: BoardSize,
    cards: Vec<Card>,
    selection: Selection,
    flips: usize,
    pairs_found: usize,
}

impl Board {
    /// Deal a new board.
    ///
    /// `faces` may contain duplicates and more faces than needed; the board
    /// picks `size.pairs()` distinct faces at random, places each twice and
    /// shuffles the layout.
    pub fn new(size: BoardSize, faces: &[CardFace], rng: &GameRng) -> Result<Self, BoardError> {
        let mut seen = FxHashSet::default();
        let mut distinct: Vec<CardFace> = faces
            .iter()
            .filter(|face| seen.insert(*face))
            .cloned()
            .collect();

        let required = size.pairs();
        if distinct.len() < required {
            return Err(BoardError::NotEnoughImages {
                required,
                available: distinct.len(),
            });
        }

        rng.for_context("pick").shuffle(&mut distinct);
        distinct.truncate(required);

        let mut layout: Vec<CardFace> = distinct.iter().chain(distinct.iter()).cloned().collect();
        rng.for_context("layout").shuffle(&mut layout);

        debug!(size = ?size, cards = layout.len(), "dealt board");

        Ok(Self {
            size,
            cards: layout.into_iter().map(Card::new).collect(),
            selection: Selection::None,
            flips: 0,
            pairs_found: 0,
        })
    }

    /// Flip the card at `position`.
    ///
    /// ## Preconditions
    ///
    /// Callers must not flip on a won board or flip a card that is already
    /// face up (`GameSession::play` enforces both). Flipping the selected
    /// card a second time is unspecified. Only an out-of-range position is
    /// rejected here, with `FlipOutcome::Invalid`.
    pub fn flip(&mut self, position: usize) -> FlipOutcome {
        if position >= self.cards.len() {
            return FlipOutcome::Invalid;
        }

        let outcome = match self.selection {
            Selection::None => {
                self.restore_cards();
                self.selection = Selection::One(position);
                FlipOutcome::FlippedNoMatch
            }
            Selection::One(selected) => {
                self.selection = Selection::None;
                if self.check_for_match(selected, position) {
                    FlipOutcome::FlippedMatch
                } else {
                    FlipOutcome::FlippedNoMatch
                }
            }
        };

        self.flips += 1;
        self.cards[position].face_up = true;
        debug!(position, outcome = ?outcome, flips = self.flips, "flipped card");
        outcome
    }

    fn check_for_match(&mut self, first: usize, second: usize) -> bool {
        if self.cards[first].face != self.cards[second].face {
            return false;
        }
        self.cards[first].matched = true;
        self.cards[second].matched = true;
        self.pairs_found += 1;
        true
    }

    fn restore_cards(&mut self) {
        for card in &mut self.cards {
            card.restore();
        }
    }

    /// Has every pair been found?
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.pairs_found == self.size.pairs()
    }

    /// Is the card at `position` face up? Out-of-range positions are not.
    #[must_use]
    pub fn is_face_up(&self, position: usize) -> bool {
        self.cards.get(position).is_some_and(|card| card.face_up)
    }

    /// Completed pair attempts (two flips per move).
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.flips / 2
    }

    /// Total flips so far.
    #[must_use]
    pub fn flip_count(&self) -> usize {
        self.flips
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn pairs_found(&self) -> usize {
        self.pairs_found
    }

    /// Pairs on this board.
    #[must_use]
    pub fn pairs(&self) -> usize {
        self.size.pairs()
    }

    /// Fraction of pairs found, from 0.0 to 1.0.
    #[must_use]
    pub fn pair_progress(&self) -> f32 {
        self.pairs_found as f32 / self.size.pairs() as f32
    }

    /// Board layout.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Current selection cursor.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Read-only view of every card, in position order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at `position`.
    #[must_use]
    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Position of the other card with the same face as `position`.
    #[must_use]
    pub fn partner_of(&self, position: usize) -> Option<usize> {
        let face = &self.cards.get(position)?.face;
        self.cards
            .iter()
            .enumerate()
            .find(|(i, card)| *i != position && card.face == *face)
            .map(|(i, _)| i)
    }

    /// Counters for display.
    #[must_use]
    pub fn status(&self) -> BoardStatus {
        BoardStatus {
            moves: self.move_count(),
            pairs_found: self.pairs_found,
            pairs: self.pairs(),
            won: self.has_won(),
        }
    }
}

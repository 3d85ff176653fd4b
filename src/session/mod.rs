//! Game session: the controller a presentation layer drives.
//!
//! A session owns the current board plus everything needed to deal the next
//! one (size, icon table, custom deck, RNG). It guards the board's calling
//! convention so a UI can forward raw tap positions:
//!
//! - flips on a won board are rejected
//! - flips on a face-up card are rejected
//!
//! Both come back as `FlipOutcome::Invalid` without touching the board.

use tracing::{debug, info};

use crate::board::{Board, BoardError, BoardStatus, FlipOutcome};
use crate::cards::CardFace;
use crate::core::{BoardSize, GameRng, IconTable};
use crate::publish::CustomDeck;

/// A running game.
#[derive(Clone, Debug)]
pub struct GameSession {
    icons: IconTable,
    deck: Option<CustomDeck>,
    rng: GameRng,
    board: Board,
}

impl GameSession {
    /// Start a game with built-in icons.
    pub fn new(size: BoardSize, icons: IconTable, seed: u64) -> Result<Self, BoardError> {
        let rng = GameRng::new(seed);
        let board = Board::new(size, &icons.faces(), &rng)?;
        Ok(Self {
            icons,
            deck: None,
            rng,
            board,
        })
    }

    /// Start a game with a downloaded custom deck.
    pub fn with_deck(deck: CustomDeck, icons: IconTable, seed: u64) -> Result<Self, BoardError> {
        let rng = GameRng::new(seed);
        let board = Board::new(deck.size, &deck.images, &rng)?;
        Ok(Self {
            icons,
            deck: Some(deck),
            rng,
            board,
        })
    }

    /// Flip the card at `position`, rejecting moves the board must not see.
    pub fn play(&mut self, position: usize) -> FlipOutcome {
        if self.board.has_won() {
            debug!(position, "flip rejected: game already won");
            return FlipOutcome::Invalid;
        }
        if self.board.is_face_up(position) {
            debug!(position, "flip rejected: card already face up");
            return FlipOutcome::Invalid;
        }

        let outcome = self.board.flip(position);
        if outcome == FlipOutcome::FlippedMatch {
            info!(
                pairs_found = self.board.pairs_found(),
                pairs = self.board.pairs(),
                "found a match"
            );
            if self.board.has_won() {
                info!(moves = self.board.move_count(), "game won");
            }
        }
        outcome
    }

    /// Deal a fresh board with the same size and deck.
    pub fn restart(&mut self) -> Result<(), BoardError> {
        self.rebuild(self.board.size())
    }

    /// Switch to another size. Any custom deck is dropped in favour of the
    /// built-in icons.
    pub fn resize(&mut self, size: BoardSize) -> Result<(), BoardError> {
        if let Some(deck) = self.deck.take() {
            info!(deck = %deck.name, "leaving custom deck");
        }
        self.rebuild(size)
    }

    /// Play a custom deck. The board size follows the deck.
    pub fn load_custom_deck(&mut self, deck: CustomDeck) -> Result<(), BoardError> {
        let size = deck.size;
        let previous = self.deck.replace(deck);
        if let Err(err) = self.rebuild(size) {
            self.deck = previous;
            return Err(err);
        }
        info!(deck = self.deck_name().unwrap_or_default(), size = ?size, "now playing custom deck");
        Ok(())
    }

    /// Deal a new board. The RNG only moves forward when the deal succeeds,
    /// so a failed deal leaves the session exactly as it was.
    fn rebuild(&mut self, size: BoardSize) -> Result<(), BoardError> {
        let mut rng = self.rng.clone();
        rng.advance();
        let board = Board::new(size, &self.faces(), &rng)?;
        self.rng = rng;
        self.board = board;
        Ok(())
    }

    fn faces(&self) -> Vec<CardFace> {
        match &self.deck {
            Some(deck) => deck.images.clone(),
            None => self.icons.faces(),
        }
    }

    /// Would restarting now throw away progress?
    #[must_use]
    pub fn needs_restart_confirmation(&self) -> bool {
        self.board.move_count() > 0 && !self.board.has_won()
    }

    /// The current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current board size.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    /// Icon table used for built-in faces.
    #[must_use]
    pub fn icons(&self) -> &IconTable {
        &self.icons
    }

    /// Name of the custom deck being played, if any.
    #[must_use]
    pub fn deck_name(&self) -> Option<&str> {
        self.deck.as_ref().map(|deck| deck.name.as_str())
    }

    /// Counters for display.
    #[must_use]
    pub fn status(&self) -> BoardStatus {
        self.board.status()
    }
}

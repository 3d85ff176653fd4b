//! Card state on the board.
//!
//! Cards are addressed by position; only the board engine mutates them.
//! A matched card never goes back to unmatched.

use serde::{Deserialize, Serialize};

use super::face::CardFace;

/// One card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// What the card shows when face up.
    pub face: CardFace,

    /// Is the card currently showing its face?
    pub face_up: bool,

    /// Has the card been matched with its partner?
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(face: CardFace) -> Self {
        Self {
            face,
            face_up: false,
            matched: false,
        }
    }

    /// Turn the card face down unless it is matched.
    ///
    /// Returns true if the card was turned over.
    pub(crate) fn restore(&mut self) -> bool {
        if self.matched || !self.face_up {
            return false;
        }
        self.face_up = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardFace::Icon(2));
        assert!(!card.face_up);
        assert!(!card.matched);
        assert_eq!(card.face, CardFace::Icon(2));
    }

    #[test]
    fn test_restore_skips_matched() {
        let mut card = Card::new(CardFace::Icon(2));
        card.face_up = true;
        card.matched = true;
        assert!(!card.restore());
        assert!(card.face_up);

        let mut loose = Card::new(CardFace::Icon(3));
        loose.face_up = true;
        assert!(loose.restore());
        assert!(!loose.face_up);
        assert!(!loose.restore());
    }
}

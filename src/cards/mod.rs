//! Card faces and card state.
//!
//! - `CardFace`: What is printed on a card (built-in icon or custom image)
//! - `Card`: One position on the board with its face-up/matched flags

pub mod card;
pub mod face;

pub use card::Card;
pub use face::CardFace;

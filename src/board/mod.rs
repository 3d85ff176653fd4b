//! Board engine: card layout, flip/match/restore transitions, win detection.
//!
//! The board exclusively owns its cards. Callers address cards by position
//! and read them through accessors; nothing outside this module mutates them.

mod engine;
mod error;

pub use engine::{Board, BoardStatus, FlipOutcome, Selection};
pub use error::BoardError;

//! Board construction errors.

/// Errors produced while setting up a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Fewer distinct faces were supplied than the board has pairs.
    #[error("board needs {required} distinct images, only {available} available")]
    NotEnoughImages { required: usize, available: usize },
}

//! Move rejection errors.

use crate::position::Position;
use crate::types::Mark;

/// Error that can occur when applying a move.
///
/// Every variant is a recoverable rejection: the board, scores and move
/// sequence are left exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The cell is occupied, or the board no longer accepts marks.
    #[display("Square {} is not available", _0)]
    InvalidMove(#[error(not(source))] Position),

    /// The move was submitted for the side not currently to move.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] Mark),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,
}

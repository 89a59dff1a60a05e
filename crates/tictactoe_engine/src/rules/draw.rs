//! Draw detection logic for tic-tac-toe.

use crate::types::Cell;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner indicates a draw.
pub fn is_full(cells: &[Cell; 9]) -> bool {
    cells.iter().all(|c| !c.is_empty())
}

//! Game rules for tic-tac-toe.
//!
//! Pure functions over a row of nine cells. Rules are kept apart from
//! board storage so the heuristic selector can reuse the line scan.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Line, check_winner};

use crate::types::{Cell, GameStatus};
use tracing::instrument;

/// Classifies a set of cells as won, drawn, or still in progress.
///
/// A winning line takes precedence over a full board. When several lines are
/// complete at once, the first in [`Line::ALL`] order is reported.
#[instrument(level = "trace")]
pub fn evaluate(cells: &[Cell; 9]) -> GameStatus {
    if let Some((winner, line)) = check_winner(cells) {
        GameStatus::Won { winner, line }
    } else if is_full(cells) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

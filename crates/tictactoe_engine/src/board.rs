//! Board state: the grid, whose turn it is, and whether the game is over.

use crate::error::MoveError;
use crate::position::Position;
use crate::rules;
use crate::types::{Cell, GameStatus, Mark};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// The 3x3 grid plus turn and terminal status.
///
/// Mutation goes through [`BoardState::place_mark`], [`BoardState::advance_turn`],
/// [`BoardState::set_status`] and [`BoardState::reset`]. Once the status is
/// terminal, `place_mark` refuses every cell until `reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    cells: [Cell; 9],
    current_turn: Mark,
    status: GameStatus,
}

impl BoardState {
    /// Creates an empty board with X to move.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
            current_turn: Mark::X,
            status: GameStatus::InProgress,
        }
    }

    /// Builds a board from explicit cells, for analysing arbitrary positions.
    ///
    /// The turn and status are taken as given; no consistency check is made
    /// between them and the cells.
    pub fn from_cells(cells: [Cell; 9], current_turn: Mark) -> Self {
        Self {
            cells,
            current_turn,
            status: GameStatus::InProgress,
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Whose mark the next accepted move places.
    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| c.mark() == Some(mark))
            .count()
    }

    /// Places the current turn's mark at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidMove`] if the game is over or the cell is
    /// occupied. The board is unchanged in that case.
    #[instrument(skip(self), fields(turn = %self.current_turn))]
    pub fn place_mark(&mut self, pos: Position) -> Result<(), MoveError> {
        if self.status.is_terminal() || !self.is_empty(pos) {
            return Err(MoveError::InvalidMove(pos));
        }
        self.cells[pos.to_index()] = Cell::Occupied(self.current_turn);
        trace!(%pos, "Mark placed");
        Ok(())
    }

    /// Examines the eight lines and the fill level of the board.
    ///
    /// Does not store the result; see [`BoardState::set_status`].
    pub fn evaluate_terminal(&self) -> GameStatus {
        rules::evaluate(&self.cells)
    }

    /// Hands the move to the other side. Only meaningful while in progress.
    pub fn advance_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// Records the status computed by [`BoardState::evaluate_terminal`].
    pub fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    /// Clears every cell and gives the first move back to X.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

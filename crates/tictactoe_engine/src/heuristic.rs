//! Rule-based computer opponent.
//!
//! The selector walks a fixed priority list and stops at the first rule
//! that yields a cell:
//!
//! 1. complete a line for the computer,
//! 2. block a line the opponent could complete,
//! 3. take the center,
//! 4. take a random empty corner,
//! 5. take a random empty edge.
//!
//! It does not look ahead, so it can be beaten by forks.

use crate::position::Position;
use crate::rules::Line;
use crate::types::{Cell, Mark};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which priority rule produced a move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Rule {
    /// Completes three in a row for the computer.
    Win,
    /// Stops the opponent completing three in a row.
    Block,
    /// Takes the center cell.
    Center,
    /// Takes one of the empty corners.
    Corner,
    /// Takes one of the empty edges.
    Edge,
}

/// A selected cell and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Cell to play.
    pub position: Position,
    /// Rule that fired.
    pub rule: Rule,
}

/// Finds the empty cell that would give `mark` three in a row.
///
/// Scans lines in [`Line::ALL`] order and returns the gap in the first line
/// holding exactly two of `mark` and one empty cell.
pub fn find_completing_cell(cells: &[Cell; 9], mark: Mark) -> Option<Position> {
    Line::ALL.into_iter().find_map(|line| {
        let [a, b, c] = line.positions();
        let mut owned = 0;
        let mut gap = None;
        let mut gaps = 0;
        for pos in [a, b, c] {
            match cells[pos.to_index()] {
                Cell::Occupied(m) if m == mark => owned += 1,
                Cell::Occupied(_) => {}
                Cell::Empty => {
                    gaps += 1;
                    gap = Some(pos);
                }
            }
        }
        if owned == 2 && gaps == 1 { gap } else { None }
    })
}

/// Picks uniformly among the empty cells of `candidates`.
fn pick_random<R: Rng + ?Sized>(
    cells: &[Cell; 9],
    candidates: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let open: Vec<Position> = candidates
        .iter()
        .copied()
        .filter(|pos| cells[pos.to_index()].is_empty())
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

/// Chooses the computer's move and reports which rule fired.
///
/// Returns `None` only for a full board, which the engine never asks about.
#[instrument(skip(cells, rng), fields(mark = %computer))]
pub fn decide<R: Rng + ?Sized>(cells: &[Cell; 9], computer: Mark, rng: &mut R) -> Option<Decision> {
    let decision = if let Some(position) = find_completing_cell(cells, computer) {
        Decision {
            position,
            rule: Rule::Win,
        }
    } else if let Some(position) = find_completing_cell(cells, computer.opponent()) {
        Decision {
            position,
            rule: Rule::Block,
        }
    } else if cells[Position::Center.to_index()].is_empty() {
        Decision {
            position: Position::Center,
            rule: Rule::Center,
        }
    } else if let Some(position) = pick_random(cells, &Position::CORNERS, rng) {
        Decision {
            position,
            rule: Rule::Corner,
        }
    } else if let Some(position) = pick_random(cells, &Position::EDGES, rng) {
        Decision {
            position,
            rule: Rule::Edge,
        }
    } else {
        debug!("No empty cell to choose from");
        return None;
    };

    debug!(position = %decision.position, rule = %decision.rule, "Computer chose move");
    Some(decision)
}

/// Chooses the computer's move.
pub fn select_move<R: Rng + ?Sized>(cells: &[Cell; 9], computer: Mark, rng: &mut R) -> Option<Position> {
    decide(cells, computer, rng).map(|d| d.position)
}

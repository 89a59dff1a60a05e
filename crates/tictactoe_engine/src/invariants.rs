//! Properties that hold for boards reached by legal alternating play.
//!
//! The engine does not enforce these; it checks them after each accepted
//! move in debug builds and logs any violation.

use crate::board::BoardState;
use crate::types::{GameStatus, Mark};

/// A rule every board reached by legal play satisfies.
pub trait BoardInvariant {
    /// One-line statement of the rule, used in violation reports.
    const RULE: &'static str;

    /// True when `board` satisfies the rule.
    fn holds(board: &BoardState) -> bool;

    /// Reports the board as a violation if the rule fails.
    fn check(board: &BoardState) -> Option<InvariantViolation> {
        (!Self::holds(board)).then(|| InvariantViolation::of(Self::RULE, board))
    }
}

/// A broken board rule, with the mark counts at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{} (X marks: {}, O marks: {}, to move: {})", rule, x_marks, o_marks, to_move)]
pub struct InvariantViolation {
    /// The rule that failed.
    pub rule: &'static str,
    /// Marks X had on the board.
    pub x_marks: usize,
    /// Marks O had on the board.
    pub o_marks: usize,
    /// Side the board said was to move.
    pub to_move: Mark,
}

impl InvariantViolation {
    fn of(rule: &'static str, board: &BoardState) -> Self {
        Self {
            rule,
            x_marks: board.count(Mark::X),
            o_marks: board.count(Mark::O),
            to_move: board.current_turn(),
        }
    }
}

/// Board rules checked together; implemented for tuples of [`BoardInvariant`]s.
pub trait InvariantSet {
    /// Every rule in the set that `board` breaks, in tuple order.
    fn violations(board: &BoardState) -> Vec<InvariantViolation>;

    /// `Ok` when no rule is broken.
    fn check_all(board: &BoardState) -> Result<(), Vec<InvariantViolation>> {
        let violations = Self::violations(board);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<A, B, C> InvariantSet for (A, B, C)
where
    A: BoardInvariant,
    B: BoardInvariant,
    C: BoardInvariant,
{
    fn violations(board: &BoardState) -> Vec<InvariantViolation> {
        [A::check(board), B::check(board), C::check(board)]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// X has placed as many marks as O, or one more.
pub struct MarkBalanceInvariant;

impl BoardInvariant for MarkBalanceInvariant {
    fn holds(board: &BoardState) -> bool {
        let x = board.count(Mark::X);
        let o = board.count(Mark::O);
        x == o || x == o + 1
    }

    const RULE: &'static str = "X count equals O count or exceeds it by one";
}

/// While in progress, the side to move follows from the mark counts.
pub struct TurnFollowsCountsInvariant;

impl BoardInvariant for TurnFollowsCountsInvariant {
    fn holds(board: &BoardState) -> bool {
        if board.status().is_terminal() {
            return true;
        }
        let expected = if board.count(Mark::X) == board.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        };
        board.current_turn() == expected
    }

    const RULE: &'static str = "Side to move matches the mark counts";
}

/// The stored status agrees with a fresh evaluation of the cells.
pub struct StatusConsistentInvariant;

impl BoardInvariant for StatusConsistentInvariant {
    fn holds(board: &BoardState) -> bool {
        match board.status() {
            GameStatus::InProgress => !board.evaluate_terminal().is_terminal(),
            stored => board.evaluate_terminal() == stored,
        }
    }

    const RULE: &'static str = "Stored status matches the board";
}

/// All board invariants as a composable set.
pub type BoardInvariants = (
    MarkBalanceInvariant,
    TurnFollowsCountsInvariant,
    StatusConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::types::Cell;

    #[test]
    fn test_holds_for_empty_board() {
        assert!(BoardInvariants::check_all(&BoardState::new()).is_ok());
    }

    #[test]
    fn test_holds_after_alternating_moves() {
        let mut board = BoardState::new();
        for pos in [Position::Center, Position::TopLeft, Position::BottomRight] {
            board.place_mark(pos).unwrap();
            board.advance_turn();
        }
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_detects_unbalanced_board() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Occupied(Mark::O);
        cells[1] = Cell::Occupied(Mark::O);
        let board = BoardState::from_cells(cells, Mark::X);

        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert!(
            violations
                .iter()
                .any(|v| v.rule == MarkBalanceInvariant::RULE)
        );
        assert_eq!((violations[0].x_marks, violations[0].o_marks), (0, 2));
    }

    #[test]
    fn test_detects_unrecorded_win() {
        let mut cells = [Cell::Empty; 9];
        for i in [0, 1, 2] {
            cells[i] = Cell::Occupied(Mark::X);
        }
        for i in [3, 4] {
            cells[i] = Cell::Occupied(Mark::O);
        }
        let board = BoardState::from_cells(cells, Mark::O);

        assert!(!StatusConsistentInvariant::holds(&board));
    }
}

//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Cell, Mark};
use serde::{Deserialize, Serialize};

/// One of the eight winning lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    /// Cells 0, 1, 2.
    TopRow,
    /// Cells 3, 4, 5.
    MiddleRow,
    /// Cells 6, 7, 8.
    BottomRow,
    /// Cells 0, 3, 6.
    LeftColumn,
    /// Cells 1, 4, 7.
    CenterColumn,
    /// Cells 2, 5, 8.
    RightColumn,
    /// Cells 0, 4, 8.
    MainDiagonal,
    /// Cells 2, 4, 6.
    AntiDiagonal,
}

impl Line {
    /// Lines in scan order: rows, then columns, then diagonals.
    pub const ALL: [Line; 8] = [
        Line::TopRow,
        Line::MiddleRow,
        Line::BottomRow,
        Line::LeftColumn,
        Line::CenterColumn,
        Line::RightColumn,
        Line::MainDiagonal,
        Line::AntiDiagonal,
    ];

    /// The three positions making up this line.
    pub fn positions(self) -> [Position; 3] {
        use Position::*;
        match self {
            Line::TopRow => [TopLeft, TopCenter, TopRight],
            Line::MiddleRow => [MiddleLeft, Center, MiddleRight],
            Line::BottomRow => [BottomLeft, BottomCenter, BottomRight],
            Line::LeftColumn => [TopLeft, MiddleLeft, BottomLeft],
            Line::CenterColumn => [TopCenter, Center, BottomCenter],
            Line::RightColumn => [TopRight, MiddleRight, BottomRight],
            Line::MainDiagonal => [TopLeft, Center, BottomRight],
            Line::AntiDiagonal => [TopRight, Center, BottomLeft],
        }
    }

    /// The line as board indices.
    pub fn indices(self) -> [usize; 3] {
        self.positions().map(Position::to_index)
    }

    /// True if `pos` lies on this line.
    pub fn contains(self, pos: Position) -> bool {
        self.positions().contains(&pos)
    }

    /// Reads the line's three cells from a board.
    pub fn cells(self, cells: &[Cell; 9]) -> [Cell; 3] {
        self.indices().map(|i| cells[i])
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Line::TopRow => "top row",
            Line::MiddleRow => "middle row",
            Line::BottomRow => "bottom row",
            Line::LeftColumn => "left column",
            Line::CenterColumn => "center column",
            Line::RightColumn => "right column",
            Line::MainDiagonal => "main diagonal",
            Line::AntiDiagonal => "anti-diagonal",
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Checks if there is a winner on the board.
///
/// Returns the owner and the first fully-marked line in [`Line::ALL`] order,
/// or `None` if no line is complete.
pub fn check_winner(cells: &[Cell; 9]) -> Option<(Mark, Line)> {
    Line::ALL.into_iter().find_map(|line| match line.cells(cells) {
        [Cell::Occupied(a), Cell::Occupied(b), Cell::Occupied(c)] if a == b && b == c => {
            Some((a, line))
        }
        _ => None,
    })
}

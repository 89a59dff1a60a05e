//! Text rendering of engine state.

use tictactoe_engine::{BoardState, Cell, Line, Mark, OpponentMode, Position, ScoreBoard};

/// Display names for both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerNames {
    x: String,
    o: String,
}

impl PlayerNames {
    /// Name shown for O when the computer plays it.
    pub const COMPUTER: &'static str = "Computer";

    /// Names for a game in `mode`. Against the computer, O is always "Computer".
    pub fn new(x: impl Into<String>, o: impl Into<String>, mode: OpponentMode) -> Self {
        let o = match mode {
            OpponentMode::TwoPlayer => o.into(),
            OpponentMode::VsComputer => Self::COMPUTER.to_string(),
        };
        Self { x: x.into(), o }
    }

    /// Name of the side playing `mark`.
    pub fn of(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }
}

/// Draws the grid. Empty cells show the number that claims them; cells on
/// `highlight` are bracketed.
pub fn board(state: &BoardState, highlight: Option<Line>) -> String {
    let rows: Vec<String> = (0..3)
        .map(|row| {
            (0..3)
                .map(|col| {
                    let index = row * 3 + col;
                    let pos = Position::ALL[index];
                    let on_line = highlight.is_some_and(|line| line.contains(pos));
                    match (state.get(pos), on_line) {
                        (Cell::Occupied(mark), true) => format!("[{}]", mark),
                        (Cell::Occupied(mark), false) => format!(" {} ", mark),
                        (Cell::Empty, _) => format!(" {} ", index + 1),
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rows.join("\n---+---+---\n")
}

/// "Turn for <name>"
pub fn turn(names: &PlayerNames, mark: Mark) -> String {
    format!("Turn for {}", names.of(mark))
}

/// Result announcement for a finished game.
pub fn game_over(names: &PlayerNames, winner: Option<Mark>) -> String {
    match winner {
        Some(mark) => format!("{} wins!", names.of(mark)),
        None => "It's a draw!".to_string(),
    }
}

/// One-line score summary.
pub fn scores(names: &PlayerNames, scores: &ScoreBoard) -> String {
    format!(
        "{} (X): {}  |  {} (O): {}",
        names.of(Mark::X),
        scores.wins(Mark::X),
        names.of(Mark::O),
        scores.wins(Mark::O)
    )
}

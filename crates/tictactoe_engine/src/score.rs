//! Win tallies for a session.

use crate::types::Mark;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Number of games each side has won since the engine was created.
///
/// Counts only grow. Draws are not recorded. Resetting the board leaves
/// the tallies alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Games won by X.
    x: u32,
    /// Games won by O.
    o: u32,
}

impl ScoreBoard {
    /// Creates a score board with both tallies at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Adds one win for `mark`.
    pub fn record_win(&mut self, mark: Mark) {
        let tally = match mark {
            Mark::X => &mut self.x,
            Mark::O => &mut self.o,
        };
        *tally = tally.saturating_add(1);
    }
}

impl std::fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} - {} O", self.x, self.o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_win() {
        let mut scores = ScoreBoard::new();
        scores.record_win(Mark::O);
        scores.record_win(Mark::O);
        scores.record_win(Mark::X);
        assert_eq!(scores.wins(Mark::X), 1);
        assert_eq!(scores.wins(Mark::O), 2);
        assert_eq!(*scores.x(), 1);
        assert_eq!(scores.to_string(), "X 1 - 2 O");
    }
}

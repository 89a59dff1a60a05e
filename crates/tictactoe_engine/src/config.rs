//! Engine configuration.

use crate::types::Mark;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Who supplies O's moves.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum OpponentMode {
    /// Both sides are played by people.
    #[default]
    TwoPlayer,
    /// O is played by the heuristic selector.
    VsComputer,
}

impl OpponentMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            OpponentMode::TwoPlayer => OpponentMode::VsComputer,
            OpponentMode::VsComputer => OpponentMode::TwoPlayer,
        }
    }
}

/// When the computer's reply is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyPacing {
    /// The reply is applied inside the `apply_move` call that triggered it.
    #[default]
    Immediate,
    /// The reply is left pending; a scheduler plays it after the delay.
    Deferred(Duration),
}

/// Game configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfiguration {
    /// Who supplies O's moves.
    pub opponent_mode: OpponentMode,
    /// When the computer's reply is applied.
    pub reply_pacing: ReplyPacing,
}

impl GameConfiguration {
    /// Side played by the computer in [`OpponentMode::VsComputer`].
    pub const COMPUTER_MARK: Mark = Mark::O;

    /// Creates a configuration with immediate replies.
    pub fn new(opponent_mode: OpponentMode) -> Self {
        Self {
            opponent_mode,
            reply_pacing: ReplyPacing::Immediate,
        }
    }

    /// Sets the reply pacing.
    pub fn with_pacing(mut self, reply_pacing: ReplyPacing) -> Self {
        self.reply_pacing = reply_pacing;
        self
    }

    /// The mark the computer plays, if it plays at all.
    pub fn computer_mark(&self) -> Option<Mark> {
        match self.opponent_mode {
            OpponentMode::TwoPlayer => None,
            OpponentMode::VsComputer => Some(Self::COMPUTER_MARK),
        }
    }
}

//! Notifications for the presentation layer.

use crate::config::OpponentMode;
use crate::position::Position;
use crate::rules::Line;
use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::trace;

/// Something the engine did that a renderer may want to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A mark was accepted at a position.
    MarkPlaced {
        /// Cell that received the mark.
        position: Position,
        /// The mark placed.
        mark: Mark,
        /// True when the heuristic selector chose this cell.
        by_computer: bool,
    },
    /// The game continues with `turn` to move.
    TurnChanged {
        /// Side now to move.
        turn: Mark,
    },
    /// The game reached a terminal state.
    GameEnded {
        /// `None` for a draw.
        winner: Option<Mark>,
        /// The completed line, for a win.
        line: Option<Line>,
    },
    /// The board was cleared. Scores are kept.
    GameReset,
    /// The opponent mode changed.
    ModeChanged {
        /// The new mode.
        mode: OpponentMode,
    },
}

/// Fan-out of events to any number of subscribers.
///
/// Sending never blocks. Subscribers that dropped their receiver are pruned
/// on the next emit.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Delivers `event` to every live subscriber.
    pub fn emit(&mut self, event: GameEvent) {
        trace!(?event, subscribers = self.subscribers.len(), "Emitting event");
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// Number of live subscribers as of the last emit.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

//! Tic-tac-toe rules engine.
//!
//! The engine owns the board, the session scores and the opponent
//! configuration. A presentation layer submits moves through
//! [`GameEngine::apply_move`] and observes [`GameEvent`]s; it never holds
//! game state of its own.
//!
//! # Architecture
//!
//! - **Board**: [`BoardState`] holds the cells, the side to move and the status
//! - **Rules**: win and draw detection over the eight [`Line`]s
//! - **Heuristic**: the rule-based computer opponent
//! - **Engine**: [`GameEngine`] arbitrates moves, keeps score and schedules
//!   computer replies
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameConfiguration, GameEngine, Mark, MoveOutcome, OpponentMode, Position};
//!
//! let mut engine = GameEngine::with_seed(GameConfiguration::new(OpponentMode::TwoPlayer), 0);
//! let outcome = engine.apply_move(Position::Center, Mark::X)?;
//! assert_eq!(outcome, MoveOutcome::Continued(Mark::O));
//! # Ok::<(), tictactoe_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod engine;
mod error;
mod events;
pub mod heuristic;
pub mod invariants;
mod position;
pub mod rules;
mod score;
mod types;

pub use board::BoardState;
pub use config::{GameConfiguration, OpponentMode, ReplyPacing};
pub use engine::{GameEngine, MoveOutcome, PendingReply};
pub use error::MoveError;
pub use events::{EventBus, GameEvent};
pub use heuristic::{Decision, Rule, select_move};
pub use position::{Position, PositionError};
pub use rules::Line;
pub use score::ScoreBoard;
pub use types::{Cell, GameStatus, Mark};

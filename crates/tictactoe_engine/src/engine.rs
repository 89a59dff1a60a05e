//! Move arbitration: turn order, terminal detection, scores and the
//! computer's replies.

use crate::board::BoardState;
use crate::config::{GameConfiguration, OpponentMode, ReplyPacing};
use crate::error::MoveError;
use crate::events::{EventBus, GameEvent};
use crate::heuristic;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::position::Position;
use crate::rules::Line;
use crate::score::ScoreBoard;
use crate::types::{GameStatus, Mark};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Game goes on with this side to move.
    Continued(Mark),
    /// The move completed a line.
    Won {
        /// Owner of the line.
        winner: Mark,
        /// The completed line.
        line: Line,
    },
    /// The move filled the board without a winner.
    Draw,
}

impl MoveOutcome {
    fn from_status(status: GameStatus, next_turn: Mark) -> Self {
        match status {
            GameStatus::InProgress => MoveOutcome::Continued(next_turn),
            GameStatus::Won { winner, line } => MoveOutcome::Won { winner, line },
            GameStatus::Draw => MoveOutcome::Draw,
        }
    }
}

/// Ticket for a computer reply that has been scheduled but not played.
///
/// Captures the move-sequence generation at scheduling time. If anything has
/// been played, or the game reset, before the ticket is redeemed, the reply
/// is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    generation: u64,
    mark: Mark,
    delay: Duration,
}

impl PendingReply {
    /// Generation the ticket was issued at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Side the computer will play.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// How long to wait before redeeming the ticket.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Owns the authoritative game state and arbitrates every move.
#[derive(Debug)]
pub struct GameEngine {
    board: BoardState,
    scores: ScoreBoard,
    config: GameConfiguration,
    rng: StdRng,
    generation: u64,
    events: EventBus,
}

impl GameEngine {
    /// Creates an engine with an entropy-seeded random source.
    #[instrument]
    pub fn new(config: GameConfiguration) -> Self {
        let seed: u64 = rand::rng().random();
        Self::with_seed(config, seed)
    }

    /// Creates an engine whose computer choices are reproducible.
    #[instrument]
    pub fn with_seed(config: GameConfiguration, seed: u64) -> Self {
        info!(mode = %config.opponent_mode, seed, "Creating game engine");
        Self {
            board: BoardState::new(),
            scores: ScoreBoard::new(),
            config,
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            events: EventBus::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Side to move next.
    pub fn current_turn(&self) -> Mark {
        self.board.current_turn()
    }

    /// Win tallies for the session.
    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &GameConfiguration {
        &self.config
    }

    /// Move-sequence counter. Bumped by every accepted move, reset and mode change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Registers an observer for [`GameEvent`]s.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        self.events.subscribe()
    }

    /// True when the game is live and the computer's side is to move.
    pub fn computer_to_move(&self) -> bool {
        !self.board.status().is_terminal()
            && self.config.computer_mark() == Some(self.board.current_turn())
    }

    /// Applies a move submitted by `acting`.
    ///
    /// With [`ReplyPacing::Immediate`] and the computer to move afterwards,
    /// its reply is played before returning and the outcome describes the
    /// board after that reply. With [`ReplyPacing::Deferred`] the reply is
    /// left for [`GameEngine::pending_reply`].
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game has been won or drawn, whoever
    ///   submits the move.
    /// - [`MoveError::NotYourTurn`] if `acting` is not to move, or is the
    ///   computer's side.
    /// - [`MoveError::InvalidMove`] if the cell is occupied.
    ///
    /// Nothing changes on error.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_move(&mut self, position: Position, acting: Mark) -> Result<MoveOutcome, MoveError> {
        if self.board.status().is_terminal() {
            warn!(%position, "Move after game over");
            return Err(MoveError::GameOver);
        }
        if self.config.computer_mark() == Some(acting) {
            warn!(%acting, "Move submitted for the computer's side");
            return Err(MoveError::NotYourTurn(acting));
        }

        let mut outcome = self.play(position, acting, false)?;

        if self.config.reply_pacing == ReplyPacing::Immediate {
            while self.computer_to_move() {
                match self.play_computer_move()? {
                    Some(reply) => outcome = reply,
                    None => break,
                }
            }
        }

        Ok(outcome)
    }

    /// Issues a ticket for the computer's reply, if the computer is to move.
    pub fn pending_reply(&self) -> Option<PendingReply> {
        if !self.computer_to_move() {
            return None;
        }
        let delay = match self.config.reply_pacing {
            ReplyPacing::Immediate => Duration::ZERO,
            ReplyPacing::Deferred(delay) => delay,
        };
        Some(PendingReply {
            generation: self.generation,
            mark: self.board.current_turn(),
            delay,
        })
    }

    /// Plays the computer's reply for a previously issued ticket.
    ///
    /// Returns `Ok(None)` without touching the game if the ticket is stale:
    /// a move was played, the game was reset or the mode changed since it
    /// was issued.
    #[instrument(skip(self), fields(current = self.generation))]
    pub fn play_pending(&mut self, ticket: PendingReply) -> Result<Option<MoveOutcome>, MoveError> {
        if ticket.generation != self.generation || !self.computer_to_move() {
            debug!(ticket = ticket.generation, "Discarding stale computer reply");
            return Ok(None);
        }
        self.play_computer_move()
    }

    /// Clears the board and hands the first move to X. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.board.reset();
        self.generation += 1;
        info!(generation = self.generation, "Game reset");
        self.events.emit(GameEvent::GameReset);
    }

    /// Switches who plays O, then starts a fresh game.
    #[instrument(skip(self))]
    pub fn set_opponent_mode(&mut self, mode: OpponentMode) {
        info!(from = %self.config.opponent_mode, to = %mode, "Changing opponent mode");
        self.config.opponent_mode = mode;
        self.events.emit(GameEvent::ModeChanged { mode });
        self.reset_game();
    }

    /// Selects and plays the computer's move.
    fn play_computer_move(&mut self) -> Result<Option<MoveOutcome>, MoveError> {
        let mark = self.board.current_turn();
        let Some(decision) = heuristic::decide(self.board.cells(), mark, &mut self.rng) else {
            warn!("Computer asked to move on a full board");
            return Ok(None);
        };
        self.play(decision.position, mark, true).map(Some)
    }

    /// Validates and applies one move, then settles the game status.
    fn play(&mut self, position: Position, acting: Mark, by_computer: bool) -> Result<MoveOutcome, MoveError> {
        let turn = self.board.current_turn();
        if acting != turn {
            warn!(%acting, expected = %turn, "Move out of turn");
            return Err(MoveError::NotYourTurn(acting));
        }
        if self.board.status().is_terminal() {
            warn!(%position, "Move after game over");
            return Err(MoveError::GameOver);
        }
        self.board.place_mark(position).inspect_err(|e| {
            warn!(%position, error = %e, "Invalid move");
        })?;

        self.generation += 1;
        debug!(%position, mark = %acting, by_computer, "Move accepted");
        self.events.emit(GameEvent::MarkPlaced {
            position,
            mark: acting,
            by_computer,
        });

        let status = self.board.evaluate_terminal();
        match status {
            GameStatus::Won { winner, line } => {
                self.board.set_status(status);
                self.scores.record_win(winner);
                info!(%winner, %line, scores = %self.scores, "Game won");
                self.events.emit(GameEvent::GameEnded {
                    winner: Some(winner),
                    line: Some(line),
                });
            }
            GameStatus::Draw => {
                self.board.set_status(status);
                info!("Game drawn");
                self.events.emit(GameEvent::GameEnded {
                    winner: None,
                    line: None,
                });
            }
            GameStatus::InProgress => {
                self.board.advance_turn();
                self.events.emit(GameEvent::TurnChanged {
                    turn: self.board.current_turn(),
                });
            }
        }

        if cfg!(debug_assertions) {
            if let Err(violations) = BoardInvariants::check_all(&self.board) {
                for violation in violations {
                    warn!(%violation, "Board invariant violated");
                }
            }
        }

        Ok(MoveOutcome::from_status(status, self.board.current_turn()))
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfiguration::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn two_player() -> GameEngine {
        GameEngine::with_seed(GameConfiguration::new(OpponentMode::TwoPlayer), 1)
    }

    fn vs_computer(pacing: ReplyPacing) -> GameEngine {
        GameEngine::with_seed(
            GameConfiguration::new(OpponentMode::VsComputer).with_pacing(pacing),
            1,
        )
    }

    #[test]
    fn test_turns_alternate() {
        let mut engine = two_player();
        assert_eq!(
            engine.apply_move(Position::Center, Mark::X),
            Ok(MoveOutcome::Continued(Mark::O))
        );
        assert_eq!(
            engine.apply_move(Position::TopLeft, Mark::O),
            Ok(MoveOutcome::Continued(Mark::X))
        );
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_wrong_side_rejected_without_change() {
        let mut engine = two_player();
        let result = engine.apply_move(Position::Center, Mark::O);
        assert_eq!(result, Err(MoveError::NotYourTurn(Mark::O)));
        assert_eq!(engine.board(), &BoardState::new());
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_immediate_reply_is_played_inline() {
        let mut engine = vs_computer(ReplyPacing::Immediate);
        let outcome = engine.apply_move(Position::TopLeft, Mark::X).unwrap();

        assert_eq!(outcome, MoveOutcome::Continued(Mark::X));
        assert_eq!(engine.board().get(Position::Center), Cell::Occupied(Mark::O));
        assert_eq!(engine.pending_reply(), None);
    }

    #[test]
    fn test_human_cannot_play_computer_side() {
        let mut engine = vs_computer(ReplyPacing::Deferred(Duration::from_millis(500)));
        engine.apply_move(Position::TopLeft, Mark::X).unwrap();

        let before = engine.board().clone();
        assert_eq!(
            engine.apply_move(Position::Center, Mark::O),
            Err(MoveError::NotYourTurn(Mark::O))
        );
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn test_deferred_reply_played_from_ticket() {
        let mut engine = vs_computer(ReplyPacing::Deferred(Duration::from_millis(500)));
        engine.apply_move(Position::TopLeft, Mark::X).unwrap();

        let ticket = engine.pending_reply().unwrap();
        assert_eq!(ticket.mark(), Mark::O);
        assert_eq!(ticket.delay(), Duration::from_millis(500));

        let outcome = engine.play_pending(ticket).unwrap();
        assert_eq!(outcome, Some(MoveOutcome::Continued(Mark::X)));
        assert_eq!(engine.board().get(Position::Center), Cell::Occupied(Mark::O));
    }

    #[test]
    fn test_stale_ticket_after_reset_is_ignored() {
        let mut engine = vs_computer(ReplyPacing::Deferred(Duration::from_millis(500)));
        engine.apply_move(Position::TopLeft, Mark::X).unwrap();
        let ticket = engine.pending_reply().unwrap();

        engine.reset_game();

        assert_eq!(engine.play_pending(ticket), Ok(None));
        assert_eq!(engine.board(), &BoardState::new());
    }

    #[test]
    fn test_ticket_cannot_be_redeemed_twice() {
        let mut engine = vs_computer(ReplyPacing::Deferred(Duration::from_millis(10)));
        engine.apply_move(Position::TopLeft, Mark::X).unwrap();
        let ticket = engine.pending_reply().unwrap();

        assert!(engine.play_pending(ticket).unwrap().is_some());
        assert_eq!(engine.play_pending(ticket), Ok(None));
        assert_eq!(engine.board().count(Mark::O), 1);
    }

    #[test]
    fn test_no_ticket_in_two_player_mode() {
        let mut engine = two_player();
        engine.apply_move(Position::TopLeft, Mark::X).unwrap();
        assert_eq!(engine.pending_reply(), None);
    }

    #[test]
    fn test_mode_change_resets_board_and_keeps_scores() {
        let mut engine = two_player();
        for (pos, mark) in [
            (Position::TopLeft, Mark::X),
            (Position::Center, Mark::O),
            (Position::TopCenter, Mark::X),
            (Position::BottomLeft, Mark::O),
            (Position::TopRight, Mark::X),
        ] {
            engine.apply_move(pos, mark).unwrap();
        }
        assert_eq!(engine.scores().wins(Mark::X), 1);

        engine.set_opponent_mode(OpponentMode::VsComputer);

        assert_eq!(engine.board(), &BoardState::new());
        assert_eq!(engine.scores().wins(Mark::X), 1);
        assert_eq!(engine.config().opponent_mode, OpponentMode::VsComputer);
    }

    #[test]
    fn test_events_for_a_turn() {
        let mut engine = two_player();
        let mut rx = engine.subscribe();
        engine.apply_move(Position::Center, Mark::X).unwrap();

        assert_eq!(
            rx.try_recv(),
            Ok(GameEvent::MarkPlaced {
                position: Position::Center,
                mark: Mark::X,
                by_computer: false
            })
        );
        assert_eq!(rx.try_recv(), Ok(GameEvent::TurnChanged { turn: Mark::O }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed| {
            let mut engine = GameEngine::with_seed(GameConfiguration::new(OpponentMode::VsComputer), seed);
            engine.apply_move(Position::Center, Mark::X).unwrap();
            engine.board().clone()
        };
        assert_eq!(play(42), play(42));
    }
}

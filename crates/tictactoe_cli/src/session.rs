//! Interactive terminal session.
//!
//! The session is a pure observer of the engine: it turns typed commands
//! into engine calls and turns engine events into text. Computer replies
//! are paced through a [`ReplyScheduler`].

use crate::render::{self, PlayerNames};
use crate::scheduler::ReplyScheduler;
use crate::settings::Settings;
use anyhow::{Context, Result};
use std::io::Write;
use std::str::FromStr;
use tictactoe_engine::{GameEngine, GameEvent, GameStatus, MoveError, PendingReply, Position};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

const HELP: &str = "Commands: 1-9 or a cell name (e.g. \"top left\") to play, \
r = reset, m = toggle computer opponent, s = scores, h = help, q = quit";

/// A line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Claim a cell for the side to move.
    Play(Position),
    /// Start a fresh game, keeping scores.
    Reset,
    /// Switch between two-player and vs-computer, starting a fresh game.
    ToggleMode,
    /// Show the score line.
    Scores,
    /// Show the command summary.
    Help,
    /// Leave the session.
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r" | "reset" => Ok(Command::Reset),
            "m" | "mode" => Ok(Command::ToggleMode),
            "s" | "scores" => Ok(Command::Scores),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Position::from_label_or_number(other)
                .map(Command::Play)
                .ok_or_else(|| format!("Unrecognised command: {:?}", s.trim())),
        }
    }
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Stop the session.
    Quit,
}

/// What woke the session loop.
enum Wake {
    Line(Option<String>),
    ReplyDue(PendingReply),
}

/// A running terminal game.
pub struct Session<W: Write> {
    engine: GameEngine,
    events: mpsc::UnboundedReceiver<GameEvent>,
    scheduler: ReplyScheduler,
    player_x: String,
    player_o: String,
    names: PlayerNames,
    json_events: bool,
    out: W,
}

impl<W: Write> Session<W> {
    /// Creates a session writing to `out`.
    #[instrument(skip(out))]
    pub fn new(settings: &Settings, out: W) -> Self {
        let config = settings.game_configuration();
        let mut engine = match settings.seed() {
            Some(seed) => GameEngine::with_seed(config, *seed),
            None => GameEngine::new(config),
        };
        let events = engine.subscribe();
        let names = PlayerNames::new(
            settings.player_x().as_str(),
            settings.player_o().as_str(),
            *settings.mode(),
        );
        Self {
            engine,
            events,
            scheduler: ReplyScheduler::new(),
            player_x: settings.player_x().clone(),
            player_o: settings.player_o().clone(),
            names,
            json_events: *settings.json_events(),
            out,
        }
    }

    /// The engine behind this session.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The output sink.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// True while a computer reply is waiting on its timer.
    pub fn reply_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Prints the opening board and prompt.
    pub fn greet(&mut self) -> Result<()> {
        if self.json_events {
            return Ok(());
        }
        writeln!(self.out, "Tic-tac-toe. {}", HELP)?;
        self.show_position()
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(mut self, input: R) -> Result<W> {
        info!("Session started");
        self.greet()?;
        let mut lines = input.lines();

        loop {
            let wake = tokio::select! {
                line = lines.next_line() => Wake::Line(line.context("Failed to read input")?),
                Some(ticket) = self.scheduler.next_due() => Wake::ReplyDue(ticket),
            };
            match wake {
                Wake::Line(Some(line)) => {
                    if self.handle_line(&line)? == Flow::Quit {
                        break;
                    }
                }
                Wake::Line(None) => {
                    debug!("End of input");
                    break;
                }
                Wake::ReplyDue(ticket) => self.play_reply(ticket)?,
            }
        }

        self.scheduler.cancel();
        info!(scores = %self.engine.scores(), "Session ended");
        Ok(self.out)
    }

    /// Handles one line of input.
    #[instrument(skip(self))]
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        match Command::from_str(line) {
            Ok(command) => self.handle_command(command),
            Err(message) => {
                self.say(&message)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Applies a parsed command.
    pub fn handle_command(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Play(position) => self.play_human(position)?,
            Command::Reset => {
                self.scheduler.cancel();
                self.engine.reset_game();
                self.flush_events()?;
            }
            Command::ToggleMode => {
                self.scheduler.cancel();
                let mode = self.engine.config().opponent_mode.toggled();
                self.names = PlayerNames::new(self.player_x.as_str(), self.player_o.as_str(), mode);
                self.engine.set_opponent_mode(mode);
                self.flush_events()?;
            }
            Command::Scores => {
                let line = render::scores(&self.names, &self.engine.scores());
                self.say(&line)?;
            }
            Command::Help => self.say(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Waits for the scheduled computer reply and plays it.
    ///
    /// Returns `false` if nothing was scheduled.
    pub async fn wait_for_reply(&mut self) -> Result<bool> {
        if !self.scheduler.is_pending() {
            return Ok(false);
        }
        match self.scheduler.next_due().await {
            Some(ticket) => {
                self.play_reply(ticket)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn play_human(&mut self, position: Position) -> Result<()> {
        if self.scheduler.is_pending() {
            return self.say("Computer is thinking...");
        }
        let acting = self.engine.current_turn();
        match self.engine.apply_move(position, acting) {
            Ok(_) => {
                self.flush_events()?;
                if let Some(ticket) = self.engine.pending_reply() {
                    self.scheduler.schedule(ticket);
                }
                Ok(())
            }
            Err(MoveError::GameOver) => {
                self.say("Game is over. Type r to play again.")
            }
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.say(&e.to_string())
            }
        }
    }

    fn play_reply(&mut self, ticket: PendingReply) -> Result<()> {
        match self.engine.play_pending(ticket) {
            Ok(Some(_)) => self.flush_events(),
            Ok(None) => {
                debug!(generation = ticket.generation(), "Stale reply dropped");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Computer reply rejected");
                Ok(())
            }
        }
    }

    /// Renders everything the engine has emitted since the last call.
    ///
    /// The board is drawn once, after the batch, from the engine's current
    /// state.
    fn flush_events(&mut self) -> Result<()> {
        let mut redraw = false;
        while let Ok(event) = self.events.try_recv() {
            if self.json_events {
                let json = serde_json::to_string(&event).context("Failed to encode event")?;
                writeln!(self.out, "{}", json)?;
                continue;
            }
            match event {
                GameEvent::MarkPlaced {
                    position,
                    by_computer: true,
                    ..
                } => self.say(&format!("Computer plays {}", position))?,
                GameEvent::MarkPlaced { .. } => {}
                GameEvent::TurnChanged { .. } | GameEvent::GameEnded { .. } | GameEvent::GameReset => {
                    redraw = true
                }
                GameEvent::ModeChanged { mode } => self.say(&format!("Mode: {}", mode))?,
            }
        }
        if redraw {
            self.show_position()?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Draws the board and the status line under it.
    fn show_position(&mut self) -> Result<()> {
        let board = self.engine.board();
        let status = board.status();
        let highlight = match status {
            GameStatus::Won { line, .. } => Some(line),
            _ => None,
        };
        let mut text = render::board(board, highlight);
        text.push('\n');
        match status {
            GameStatus::InProgress => {
                text.push_str(&render::turn(&self.names, board.current_turn()));
            }
            GameStatus::Won { winner, .. } => {
                text.push_str(&render::game_over(&self.names, Some(winner)));
                text.push('\n');
                text.push_str(&render::scores(&self.names, &self.engine.scores()));
            }
            GameStatus::Draw => {
                text.push_str(&render::game_over(&self.names, None));
                text.push('\n');
                text.push_str(&render::scores(&self.names, &self.engine.scores()));
            }
        }
        self.say(&text)
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }
}

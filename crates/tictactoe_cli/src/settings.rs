//! Settings for a terminal session.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! command-line flags.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictactoe_engine::{GameConfiguration, OpponentMode, ReplyPacing};
use tracing::{debug, info, instrument};

/// Resolved session settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Who plays O.
    mode: OpponentMode,

    /// Delay before the computer replies. Zero replies inside the move.
    reply_delay_ms: u64,

    /// Seed for the computer's random choices.
    seed: Option<u64>,

    /// Display name for X.
    player_x: String,

    /// Display name for O in two-player games.
    player_o: String,

    /// Emit JSON-lines events instead of drawing the board.
    json_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: OpponentMode::TwoPlayer,
            reply_delay_ms: 500,
            seed: None,
            player_x: "Player X".to_string(),
            player_o: "Player O".to_string(),
            json_events: false,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SettingsError::new(format!("Failed to read settings file: {}", e))
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| {
            SettingsError::new(format!("Failed to parse settings: {}", e))
        })?;

        info!(mode = %settings.mode, "Settings loaded");
        Ok(settings)
    }

    /// Defaults, overlaid with the file named by `--config`, overlaid with flags.
    #[instrument(skip(cli))]
    pub fn resolve(cli: &Cli) -> Result<Self, SettingsError> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_overrides(cli);
        Ok(settings)
    }

    /// Replaces values with any given on the command line.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(delay) = cli.delay_ms {
            self.reply_delay_ms = delay;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(name) = non_blank(cli.player_x.as_deref()) {
            self.player_x = name;
        }
        if let Some(name) = non_blank(cli.player_o.as_deref()) {
            self.player_o = name;
        }
        if cli.json_events {
            self.json_events = true;
        }
    }

    /// Engine configuration for these settings.
    pub fn game_configuration(&self) -> GameConfiguration {
        let pacing = if self.reply_delay_ms == 0 {
            ReplyPacing::Immediate
        } else {
            ReplyPacing::Deferred(Duration::from_millis(self.reply_delay_ms))
        };
        GameConfiguration::new(self.mode).with_pacing(pacing)
    }

    /// Serializes the settings back to TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string(self)
            .map_err(|e| SettingsError::new(format!("Failed to serialize settings: {}", e)))
    }
}

/// Trimmed name, or `None` if nothing but whitespace was given.
fn non_blank(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mode(), &OpponentMode::TwoPlayer);
        assert_eq!(*settings.reply_delay_ms(), 500);
        assert_eq!(settings.player_x(), "Player X");
    }

    #[test]
    fn test_zero_delay_is_immediate() {
        let cli = Cli {
            delay_ms: Some(0),
            ..Cli::default()
        };
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(
            settings.game_configuration().reply_pacing,
            ReplyPacing::Immediate
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli {
            mode: Some(OpponentMode::VsComputer),
            player_x: Some("  Ada ".to_string()),
            player_o: Some("   ".to_string()),
            seed: Some(4),
            ..Cli::default()
        };
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.mode(), &OpponentMode::VsComputer);
        assert_eq!(settings.player_x(), "Ada");
        assert_eq!(settings.player_o(), "Player O");
        assert_eq!(settings.seed(), &Some(4));
        assert_eq!(
            settings.game_configuration().reply_pacing,
            ReplyPacing::Deferred(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}

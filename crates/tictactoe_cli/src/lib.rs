//! Terminal front-end for the tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Cli**: command-line flags
//! - **Settings**: defaults, TOML file and flag overrides
//! - **Session**: reads commands, drives the engine, renders its events
//! - **Scheduler**: paces the computer's replies

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod settings;

pub use cli::Cli;
pub use scheduler::ReplyScheduler;
pub use session::{Command, Flow, Session};
pub use settings::{Settings, SettingsError};

//! # mibot-app - Application State and Orchestration
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! operator console: a single [`AppState`] model, a [`Message`] enum fed by
//! keyboard input and background fetch tasks, a pure [`handler::update`]
//! function producing follow-up messages and [`UpdateAction`]s, and an
//! action runtime ([`actions`], [`poller`]) that performs HTTP calls and
//! owns the polling timers.
//!
//! The status poller, command dispatcher, and map-selection workflow all
//! live in the pure layer, so the dispatch guards ("no HTTP call while not
//! connected") and the polling lifecycle ("battery timer active iff robot
//! found") are testable without a terminal or a live backend.

pub mod actions;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod poller;
pub mod process;
pub mod settings;
pub mod state;

// Re-export primary types
pub use actions::PollerSet;
pub use handler::{update, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{CommandKind, CommandOutcome, CommandRequest, Message, StatusKind};
pub use settings::Settings;
pub use state::{AppState, ConsolePhase, Tab};

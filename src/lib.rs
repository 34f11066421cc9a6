//! bgkbot — Telegram bot for the BGK board-game community.
//!
//! Relays chat commands to the Tesera.ru board-game database and answers with
//! MarkdownV2 messages carrying inline navigation buttons.
//!
//! # Module Structure
//!
//! - `commands`: chat commands and the static command registry
//! - `session`: per-chat conversation state machine
//! - `callback`: inline-button callback token codec and dispatch
//! - `tesera`: Tesera.ru API client behind the `GameSource` trait
//! - `telegram`: event loop adapter around teloxide
//! - `message`: outgoing message value object
//! - `config`: environment-based configuration
//! - `errors`: centralized error types

pub mod callback;
pub mod commands;
pub mod config;
pub mod errors;
pub mod message;
pub mod session;
pub mod telegram;
pub mod tesera;

// Re-export commonly used types for convenience
pub use commands::{Command, CommandContext, Outcome, Registry};
pub use errors::{BotError, BotResult};
pub use message::TextMessage;
pub use session::Sessions;
pub use tesera::{GameSource, TeseraClient};

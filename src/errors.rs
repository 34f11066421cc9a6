use thiserror::Error;

/// Centralized error types for the bot
///
/// All recoverable failures are converted to this enum. A `BotError` never
/// terminates the process: conversation-level variants become a user-facing
/// chat message and end only the current command's session.
#[derive(Error, Debug)]
pub enum BotError {
    /// The remote source returned nothing for a collection fetch
    #[error("failed to fetch collection of user {0}")]
    SourceUnavailable(String),

    /// The fetch succeeded but yielded no usable game records
    #[error("no usable game records in collection of user {0}")]
    NoData(String),

    /// Malformed callback token payload
    #[error("invalid callback token: {0}")]
    InvalidToken(String),

    /// Slash-command name not present in the registry
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The transport receive loop was started twice
    #[error("bot is already running")]
    AlreadyRunning,

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP errors from the Tesera client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Type alias for Result with BotError
pub type BotResult<T> = Result<T, BotError>;

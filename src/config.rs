use once_cell::sync::Lazy;
use std::env;

/// Configuration constants for the bot

/// Environment variable holding the Telegram bot token
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Prefix of the numbered environment variables holding Tesera.ru logins
/// of the collection owners: `COLLECTION_OWNER_LOGIN_1`, `_2`, ...
/// Enumeration stops at the first gap.
pub const OWNER_LOGIN_VAR_PREFIX: &str = "COLLECTION_OWNER_LOGIN_";

/// Telegram bot token
/// Read once at startup from TELEGRAM_BOT_TOKEN
pub static BOT_TOKEN: Lazy<Option<String>> = Lazy::new(|| env::var(BOT_TOKEN_VAR).ok());

/// Configured collection owner logins, in declaration order
pub static OWNER_LOGINS: Lazy<Vec<String>> =
    Lazy::new(|| owner_logins_from(|name| env::var(name).ok()));

/// Enumerates owner logins through an injectable lookup so tests don't have
/// to mutate the process environment.
///
/// Reads `COLLECTION_OWNER_LOGIN_1`, `_2`, ... and stops at the first missing
/// or empty variable.
pub fn owner_logins_from(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let mut logins = Vec::new();
    for i in 1.. {
        match lookup(&format!("{}{}", OWNER_LOGIN_VAR_PREFIX, i)) {
            Some(value) if !value.is_empty() => logins.push(value),
            _ => break,
        }
    }
    logins
}

/// Base URL of the Tesera REST API
pub static TESERA_API_BASE: Lazy<String> = Lazy::new(|| {
    env::var("TESERA_API_BASE").unwrap_or_else(|_| "https://api.tesera.ru".to_string())
});

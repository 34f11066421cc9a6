use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use bgkbot::commands::{CommandContext, Registry};
use bgkbot::config;
use bgkbot::session::Sessions;
use bgkbot::telegram::{self, HandlerDeps};
use bgkbot::tesera::TeseraClient;

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if the bot token is missing or startup fails. Everything
/// after startup is recoverable at the conversation level and never
/// terminates the process.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env before any config is read
    let _ = dotenv();
    pretty_env_logger::init();

    let token = config::BOT_TOKEN
        .clone()
        .with_context(|| format!("{} is not set", config::BOT_TOKEN_VAR))?;

    let owner_logins = config::OWNER_LOGINS.clone();
    if owner_logins.is_empty() {
        log::warn!(
            "No collection owners configured ({}1, ...) — /collection will report it",
            config::OWNER_LOGIN_VAR_PREFIX
        );
    }

    let ctx = CommandContext {
        source: Arc::new(TeseraClient::new(config::TESERA_API_BASE.clone())),
        owner_logins,
    };
    let deps = HandlerDeps {
        ctx: Arc::new(ctx),
        sessions: Arc::new(Sessions::new(Registry::default())),
    };

    telegram::run(&token, deps).await?;
    Ok(())
}

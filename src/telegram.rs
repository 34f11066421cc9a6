//! Telegram event loop adapter.
//!
//! Receives inbound updates (messages, button presses) and dispatches them to
//! the callback resolver / conversation state machine, translating the
//! results back into send-calls. Each update is handled independently; no
//! buffering or reordering happens here. Delivery failures (answering a
//! callback, sending a chat action) are logged and swallowed so they never
//! abort the rest of a turn.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::sugar::request::RequestLinkPreviewExt;
use teloxide::types::{ChatAction, ParseMode};

use crate::callback;
use crate::commands::CommandContext;
use crate::errors::{BotError, BotResult};
use crate::message::TextMessage;
use crate::session::Sessions;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared handler dependencies, cloned into every dptree endpoint
#[derive(Clone)]
pub struct HandlerDeps {
    pub ctx: Arc<CommandContext>,
    pub sessions: Arc<Sessions>,
}

static STARTED: AtomicBool = AtomicBool::new(false);

/// Verifies the token, then runs the long-polling dispatcher until shutdown.
///
/// Fails with [`BotError::AlreadyRunning`] if the receive loop was started
/// before. Ctrl-C terminates the dispatcher promptly.
pub async fn run(token: &str, deps: HandlerDeps) -> BotResult<()> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Err(BotError::AlreadyRunning);
    }

    let bot = Bot::new(token);
    let me = bot.get_me().await?;
    log::info!("@{} запущен", me.username());

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Handler tree for the dispatcher; also used by integration tests
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_messages = deps.clone();

    dptree::entry()
        .branch(callback_handler(deps))
        .branch(message_handler(deps_messages))
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            if let Err(e) = handle_callback(&bot, q, &deps).await {
                log::error!("Callback handler failed: {}", e);
            }
            Ok(())
        }
    })
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
        let deps = deps.clone();
        async move {
            if let Err(e) = handle_message(&bot, &msg, &deps).await {
                log::error!("Message handler failed: {}", e);
            }
            Ok(())
        }
    })
}

/// Handles a button press: decode the token, invoke the operation, send the
/// rendered message to the presser. A token that cannot be handled is
/// acknowledged with an alert naming the payload.
pub async fn handle_callback(bot: &Bot, q: CallbackQuery, deps: &HandlerDeps) -> BotResult<()> {
    let Some(data) = q.data.clone() else {
        return Ok(());
    };

    let from = q.from.username.as_deref().unwrap_or("<unknown>");
    let source_message = q.message.as_ref().map(|m| m.id().0);
    log::info!("@{} нажал \"{}\" в сообщении {:?}", from, data, source_message);

    let chat_id = ChatId(i64::try_from(q.from.id.0).unwrap_or_default());
    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
        log::warn!("Failed to send chat action: {}", e);
    }

    let result = match callback::decode(&data) {
        Ok(token) => callback::dispatch(&token, &deps.ctx).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(message) => {
            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::warn!("Failed to answer callback query: {}", e);
            }
            send_text_message(bot, chat_id, &message).await?;
        }
        Err(e) => {
            log::warn!("Failed to handle callback \"{}\": {}", data, e);
            if let Err(e) = bot
                .answer_callback_query(q.id.clone())
                .text(format!("Не удалось обработать нажатие \"{}\"", data))
                .show_alert(true)
                .await
            {
                log::warn!("Failed to answer callback query: {}", e);
            }
        }
    }
    Ok(())
}

/// Handles a text message: membership-departure notices are ignored,
/// everything else goes through the conversation state machine.
pub async fn handle_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> BotResult<()> {
    if msg.left_chat_member().is_some() {
        return Ok(());
    }
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let text = text.trim();

    let from = msg
        .from
        .as_ref()
        .and_then(|user| user.username.as_deref())
        .unwrap_or("<unknown>");
    log::info!("@{}: {}", from, text);

    if let Err(e) = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await {
        log::warn!("Failed to send chat action: {}", e);
    }

    if let Some(response) = deps.sessions.handle(msg.chat.id, text, &deps.ctx).await {
        send_text_message(bot, msg.chat.id, &response).await?;
    }
    Ok(())
}

/// Sends a [`TextMessage`], applying its parse mode, keyboard and link
/// preview flags
pub async fn send_text_message(bot: &Bot, chat_id: ChatId, message: &TextMessage) -> BotResult<()> {
    let mut request = bot.send_message(chat_id, &message.text);
    if message.markdown {
        request = request.parse_mode(ParseMode::MarkdownV2);
    }
    if let Some(keyboard) = &message.reply_markup {
        request = request.reply_markup(keyboard.clone());
    }
    if message.disable_link_preview {
        request = request.disable_link_preview(true);
    }
    request.await?;
    Ok(())
}

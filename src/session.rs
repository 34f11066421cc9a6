//! Per-chat conversation state machine.
//!
//! Each chat has at most one active command session. A `/command` message
//! starts a fresh session (replacing and discarding any previous one); any
//! following plain text is routed to the active session until the command
//! reports it is finished. The session map is the only shared mutable state;
//! the lock is held only around map access, never across a command's
//! `respond().await`.

use std::collections::HashMap;

use teloxide::types::ChatId;
use tokio::sync::Mutex;

use crate::commands::{CancelTarget, Command, CommandContext, Outcome, Registry};
use crate::message::TextMessage;

struct ActiveSession {
    name: &'static str,
    command: Box<dyn Command>,
}

/// Chat-to-active-command map plus the command registry it resolves against
pub struct Sessions {
    registry: Registry,
    active: Mutex<HashMap<ChatId, ActiveSession>>,
}

impl Sessions {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a chat currently has an active session
    pub async fn has_session(&self, chat_id: ChatId) -> bool {
        self.active.lock().await.contains_key(&chat_id)
    }

    /// Routes one inbound text to the chat's session, creating or replacing
    /// it when the text is a `/command`. Returns the reply to send, if any.
    pub async fn handle(
        &self,
        chat_id: ChatId,
        text: &str,
        ctx: &CommandContext,
    ) -> Option<TextMessage> {
        let text = text.trim();
        let mut previous: Option<&'static str> = None;

        // Take the session out of the map for the duration of the turn so the
        // lock is not held while the command awaits remote fetches.
        let (mut session, text) = if let Some(rest) = text.strip_prefix('/') {
            let (name, remainder) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            let Some(factory) = self.registry.resolve(name) else {
                return Some(TextMessage::new(format!("\"{}\" не является командой", name)));
            };
            previous = self
                .active
                .lock()
                .await
                .remove(&chat_id)
                .map(|discarded| discarded.name);
            let command = factory();
            let session = ActiveSession {
                name: command.name(),
                command,
            };
            (session, remainder.trim_start())
        } else {
            match self.active.lock().await.remove(&chat_id) {
                Some(session) => (session, text),
                None => {
                    return Some(TextMessage::new(format!(
                        "\"{}\" не является командой или ответом на выполняемую команду",
                        text
                    )));
                }
            }
        };

        let outcome = session.command.respond(text, ctx).await;
        let (response, finished) = match outcome {
            Outcome::Completed(message) => (Some(message), true),
            Outcome::Continuing(message) => (Some(message), false),
            Outcome::Cancelled { target, reason } => {
                let cancelled = match target {
                    CancelTarget::Current => Some(session.name),
                    // Suppressed when no previous command was discarded
                    CancelTarget::Previous => previous,
                };
                let notice = cancelled.map(|name| {
                    let mut text = format!("Выполнение /{} отменено", name);
                    if let Some(reason) = reason {
                        text.push_str(&format!(". Причина: {}", reason));
                    }
                    TextMessage::new(text)
                });
                (notice, true)
            }
        };

        if !finished {
            self.active.lock().await.insert(chat_id, session);
        }
        response
    }
}

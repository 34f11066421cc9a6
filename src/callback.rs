//! Callback tokens for inline keyboard buttons.
//!
//! A token encodes `(handler, method, args...)` into the `callback_data` of an
//! inline button and is decoded on press to invoke a static operation without
//! any chat-session state. Parts are joined with `;`; a `;` or `\` appearing
//! inside a part is backslash-escaped so decoding is unambiguous. A malformed
//! token decodes to [`BotError::InvalidToken`] instead of panicking in the
//! handler.

use crate::commands::{collection, CommandContext};
use crate::errors::{BotError, BotResult};
use crate::message::TextMessage;

const DELIMITER: char = ';';
const ESCAPE: char = '\\';

/// Decoded reference to a static callback operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackToken {
    pub handler: String,
    pub method: String,
    pub args: Vec<String>,
}

fn escape_part(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for c in part.chars() {
        if c == DELIMITER || c == ESCAPE {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Encodes a callback operation reference into button `callback_data`
pub fn encode(handler: &str, method: &str, args: &[&str]) -> String {
    let mut parts = vec![escape_part(handler), escape_part(method)];
    parts.extend(args.iter().map(|arg| escape_part(arg)));
    parts.join(";")
}

/// Decodes button `callback_data` back into an operation reference.
///
/// Fails with [`BotError::InvalidToken`] on a dangling escape, an unknown
/// escape sequence, or fewer than the two mandatory parts (handler, method).
pub fn decode(data: &str) -> BotResult<CallbackToken> {
    let invalid = || BotError::InvalidToken(data.to_string());

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = data.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(escaped) if escaped == DELIMITER || escaped == ESCAPE => {
                    current.push(escaped);
                }
                _ => return Err(invalid()),
            },
            DELIMITER => parts.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    parts.push(current);

    if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(invalid());
    }

    let mut parts = parts.into_iter();
    let handler = parts.next().ok_or_else(invalid)?;
    let method = parts.next().ok_or_else(invalid)?;
    Ok(CallbackToken {
        handler,
        method,
        args: parts.collect(),
    })
}

/// Invokes the static operation a decoded token refers to.
///
/// The registry is a fixed match over known `(handler, method)` pairs with
/// positional arguments; anything else is an [`BotError::InvalidToken`].
pub async fn dispatch(token: &CallbackToken, ctx: &CommandContext) -> BotResult<TextMessage> {
    match (token.handler.as_str(), token.method.as_str(), token.args.as_slice()) {
        ("Collection", "GetCollection", [login, sort]) => {
            collection::get_collection(ctx, login, sort).await
        }
        _ => Err(BotError::InvalidToken(format!(
            "{};{}/{}",
            token.handler,
            token.method,
            token.args.len()
        ))),
    }
}

use async_trait::async_trait;

use super::{Command, CommandContext, Outcome};
use crate::message::TextMessage;

/// `/start` — greets the user and links the community channel
pub struct Start;

#[async_trait]
impl Command for Start {
    fn name(&self) -> &'static str {
        "start"
    }

    async fn respond(&mut self, _text: &str, _ctx: &CommandContext) -> Outcome {
        Outcome::Completed(
            TextMessage::new(
                "Здравствуйте, вас приветствует бот\\-помощник для канала [BGK](t.me/bg\\_kutaisi)",
            )
            .markdown()
            .without_link_preview(),
        )
    }
}

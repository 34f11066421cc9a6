use teloxide::types::InlineKeyboardMarkup;

/// Outgoing text message value object.
///
/// Pure data: text plus the flags the transport needs to deliver it
/// (MarkdownV2 parse mode, inline keyboard, link preview suppression).
/// No business logic lives here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMessage {
    pub text: String,
    pub markdown: bool,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub disable_link_preview: bool,
}

impl TextMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Render with MarkdownV2 parse mode
    pub fn markdown(mut self) -> Self {
        self.markdown = true;
        self
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(keyboard);
        self
    }

    pub fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }
}

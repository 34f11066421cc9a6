//! `/collection` — browse the board-game collections of the configured
//! Tesera.ru users.
//!
//! The command itself only asks whose collection to show; the list is rendered
//! by the `GetCollection` callback operation, re-invoked by the sort-toggle
//! buttons under the rendered list.

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::str::FromStr;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::{CancelTarget, Command, CommandContext, Outcome};
use crate::callback;
use crate::errors::{BotError, BotResult};
use crate::message::TextMessage;
use crate::tesera::{GameInfo, GameSource, UserInfo};

/// MarkdownV2-special characters that appear in game titles and player counts
static MARKUP_ESCAPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.\-()!+]").expect("Failed to compile escape regex"));

/// Backslash-escapes `. - ( ) ! +` for MarkdownV2
pub fn escape_markup(text: &str) -> String {
    MARKUP_ESCAPE_REGEX.replace_all(text, r"\$0").into_owned()
}

/// Collection ordering; the variant name is the wire form used in callback
/// tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
pub enum SortBy {
    Titles,
    Players,
    Playtimes,
    Ratings,
}

impl SortBy {
    /// Button glyph of this sort key
    pub fn glyph(self) -> &'static str {
        match self {
            SortBy::Titles => "🔤",
            SortBy::Players => "👥",
            SortBy::Playtimes => "⏳",
            SortBy::Ratings => "⭐️",
        }
    }

    fn wire_name(self) -> &'static str {
        self.into()
    }

    /// Comparator of this sort key: ascending, ties on the ranged keys broken
    /// by the range minimum.
    pub fn compare(self, x: &GameInfo, y: &GameInfo) -> Ordering {
        match self {
            SortBy::Titles => x.title.cmp(&y.title),
            SortBy::Playtimes => x
                .playtime_max
                .cmp(&y.playtime_max)
                .then(x.playtime_min.cmp(&y.playtime_min)),
            SortBy::Players => x
                .players_max
                .cmp(&y.players_max)
                .then(x.players_min.cmp(&y.players_min)),
            SortBy::Ratings => x.n10_rating.total_cmp(&y.n10_rating),
        }
    }
}

/// `/collection` command: presents one button per configured collection owner
pub struct Collection;

fn user_link(login: &str, user: &UserInfo) -> String {
    format!(
        "[{0}](tesera.ru/user/{0}/games/owns/) \\({1}\\)",
        login, user.name
    )
}

#[async_trait]
impl Command for Collection {
    fn name(&self) -> &'static str {
        "collection"
    }

    async fn respond(&mut self, _text: &str, ctx: &CommandContext) -> Outcome {
        if ctx.owner_logins.is_empty() {
            return Outcome::Cancelled {
                target: CancelTarget::Current,
                reason: Some(
                    "в переменных среды отсутствуют логины пользователей Tesera.ru".to_string(),
                ),
            };
        }

        let mut users = Vec::new();
        for login in &ctx.owner_logins {
            if let Some(user) = ctx.source.get_user_info(login).await {
                users.push((login.clone(), user));
            } else {
                log::warn!("Failed to fetch Tesera user info for {}", login);
            }
        }

        if users.is_empty() {
            return Outcome::Cancelled {
                target: CancelTarget::Current,
                reason: Some("не удалось получить данные пользователей Tesera.ru".to_string()),
            };
        }

        let listed = match users.as_slice() {
            [(login, user)] => format!("коллекции {}", user_link(login, user)),
            [(login1, user1), (login2, user2)] => format!(
                "коллекциях {} и {}",
                user_link(login1, user1),
                user_link(login2, user2)
            ),
            many => format!(
                "коллекциях: {}",
                many.iter()
                    .map(|(login, user)| user_link(login, user))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };
        let text = format!(
            "Настольные игры для игротек хранятся в {}\\. Чью коллекцию вы хотите посмотреть?",
            listed
        );

        let buttons = users
            .iter()
            .map(|(login, user)| {
                InlineKeyboardButton::callback(
                    format!("{}({})", login, user.name),
                    callback::encode(
                        "Collection",
                        "GetCollection",
                        &[login, SortBy::Titles.wire_name()],
                    ),
                )
            })
            .collect::<Vec<_>>();

        Outcome::Completed(
            TextMessage::new(text)
                .markdown()
                .with_keyboard(InlineKeyboardMarkup::new(vec![buttons])),
        )
    }
}

/// `Collection;GetCollection;<login>;<sort>` callback operation
pub async fn get_collection(
    ctx: &CommandContext,
    login: &str,
    sort_value: &str,
) -> BotResult<TextMessage> {
    let sort = SortBy::from_str(sort_value)
        .map_err(|_| BotError::InvalidToken(format!("unknown sort key \"{}\"", sort_value)))?;
    render_collection(ctx.source.as_ref(), login, sort).await
}

/// Fetches, sorts and renders one user's collection as a numbered MarkdownV2
/// list with sort-toggle buttons for every key except the active one.
pub async fn render_collection(
    source: &dyn GameSource,
    login: &str,
    sort: SortBy,
) -> BotResult<TextMessage> {
    let entries = source
        .get_collection(login)
        .await
        .ok_or_else(|| BotError::SourceUnavailable(login.to_string()))?;

    let mut games = Vec::new();
    for entry in entries {
        if entry.game.is_addition {
            continue;
        }
        let Some(alias) = entry.game.alias.filter(|alias| !alias.is_empty()) else {
            continue;
        };
        match source.get_game_detail(&alias).await {
            Some(game) if game.title.as_deref().is_some_and(|t| !t.is_empty()) => {
                games.push(game);
            }
            Some(_) => {}
            None => log::warn!("Failed to fetch game detail for {}", alias),
        }
    }

    if games.is_empty() {
        return Err(BotError::NoData(login.to_string()));
    }

    games.sort_by(|x, y| sort.compare(x, y));

    let mut text = String::new();
    for (index, game) in games.iter().enumerate() {
        render_entry(&mut text, index + 1, game);
    }

    let buttons = SortBy::iter()
        .filter(|key| *key != sort)
        .map(|key| {
            InlineKeyboardButton::callback(
                key.glyph(),
                callback::encode("Collection", "GetCollection", &[login, key.wire_name()]),
            )
        })
        .collect::<Vec<_>>();

    Ok(TextMessage::new(text)
        .markdown()
        .with_keyboard(InlineKeyboardMarkup::new(vec![buttons]))
        .without_link_preview())
}

fn render_entry(out: &mut String, index: usize, game: &GameInfo) {
    let title = escape_markup(game.title.as_deref().unwrap_or_default());
    let alias = game.alias.as_deref().unwrap_or_default().replace('-', "\\-");
    let _ = writeln!(out, "{}\\. [{}](tesera.ru/game/{})", index, title, alias);

    // Two extra spaces from index 10 on, to stay aligned with the wider number
    let mut meta = String::from(if index > 9 { "    " } else { "  " });
    if let Some(players) = game.players_count() {
        let _ = write!(meta, "  👥{}", escape_markup(&players));
    }
    if game.n10_rating != 0.0 {
        let _ = write!(meta, "  ⭐️{}", escape_markup(&game.n10_rating.to_string()));
    }
    if game.playtime_min != 0 {
        let playtime = if game.playtime_min == game.playtime_max || game.playtime_max == 0 {
            game.playtime_min.to_string()
        } else {
            format!("{}\\-{}", game.playtime_min, game.playtime_max)
        };
        let _ = write!(meta, "  ⏳{}", playtime);
    }
    let _ = writeln!(out, "{}", meta);
}

//! Serde projections of the Tesera.ru REST API payloads.
//!
//! Only the fields the bot renders are deserialized; everything else in the
//! responses is ignored. All records are immutable once fetched and used only
//! for rendering and sorting within one request.

use serde::Deserialize;

/// One entry of a user's "owned games" collection
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionEntry {
    pub game: CollectionGame,
}

/// The nested game stub inside a collection entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionGame {
    #[serde(default)]
    pub alias: Option<String>,
    /// Expansions are skipped when rendering a collection
    #[serde(default)]
    pub is_addition: bool,
}

/// Envelope of the game detail endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GameInfoResponse {
    pub game: GameInfo,
}

/// Full game record as rendered in collection lists
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub players_min: u32,
    #[serde(default)]
    pub players_max: u32,
    #[serde(default)]
    pub playtime_min: u32,
    #[serde(default)]
    pub playtime_max: u32,
    #[serde(default)]
    pub n10_rating: f64,
}

impl GameInfo {
    /// Human-readable player count range, `None` when the record has no data.
    /// A single number when the range collapses ("2"), otherwise "2-4".
    pub fn players_count(&self) -> Option<String> {
        match (self.players_min, self.players_max) {
            (0, 0) => None,
            (min, 0) => Some(min.to_string()),
            (0, max) => Some(max.to_string()),
            (min, max) if min == max => Some(min.to_string()),
            (min, max) => Some(format!("{}-{}", min, max)),
        }
    }
}

/// Envelope of the user info endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub user: UserInfo,
}

/// Tesera user profile, rendered in the owner-selection prompt
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: String,
}

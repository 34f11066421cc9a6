//! Shared test fixtures: a scripted `GameSource` double and game records.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use bgkbot::commands::CommandContext;
use bgkbot::tesera::models::CollectionGame;
use bgkbot::tesera::{CollectionEntry, GameInfo, GameSource, UserInfo};

/// In-memory `GameSource` scripted per test
#[derive(Default)]
pub struct MockSource {
    collections: HashMap<String, Vec<CollectionEntry>>,
    games: HashMap<String, GameInfo>,
    users: HashMap<String, UserInfo>,
}

#[allow(dead_code)]
impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, login: &str, name: &str) -> Self {
        self.users.insert(
            login.to_string(),
            UserInfo {
                login: login.to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_game(mut self, game: GameInfo) -> Self {
        let alias = game.alias.clone().unwrap_or_default();
        self.games.insert(alias, game);
        self
    }

    /// Scripts a collection as plain (non-addition) entries
    pub fn with_collection(mut self, login: &str, aliases: &[&str]) -> Self {
        let entries = aliases
            .iter()
            .map(|alias| CollectionEntry {
                game: CollectionGame {
                    alias: Some(alias.to_string()),
                    is_addition: false,
                },
            })
            .collect();
        self.collections.insert(login.to_string(), entries);
        self
    }

    pub fn with_entries(mut self, login: &str, entries: Vec<CollectionEntry>) -> Self {
        self.collections.insert(login.to_string(), entries);
        self
    }
}

#[async_trait]
impl GameSource for MockSource {
    async fn get_collection(&self, login: &str) -> Option<Vec<CollectionEntry>> {
        self.collections.get(login).cloned()
    }

    async fn get_game_detail(&self, alias: &str) -> Option<GameInfo> {
        self.games.get(alias).cloned()
    }

    async fn get_user_info(&self, login: &str) -> Option<UserInfo> {
        self.users.get(login).cloned()
    }
}

pub fn context(source: MockSource, owner_logins: &[&str]) -> CommandContext {
    CommandContext {
        source: Arc::new(source),
        owner_logins: owner_logins.iter().map(|login| login.to_string()).collect(),
    }
}

pub fn game(title: &str, playtime: (u32, u32), players: (u32, u32), rating: f64) -> GameInfo {
    GameInfo {
        title: Some(title.to_string()),
        alias: Some(title.to_lowercase()),
        playtime_min: playtime.0,
        playtime_max: playtime.1,
        players_min: players.0,
        players_max: players.1,
        n10_rating: rating,
    }
}

/// The three-game fixture whose playtime and title orders differ
#[allow(dead_code)]
pub fn shelf() -> MockSource {
    MockSource::new()
        .with_collection("alice", &["catan", "azul", "zoo"])
        .with_game(game("Catan", (60, 120), (3, 4), 7.2))
        .with_game(game("Azul", (30, 45), (2, 4), 7.8))
        .with_game(game("Zoo", (5, 10), (2, 2), 6.0))
}

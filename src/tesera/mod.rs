//! Tesera.ru board-game-database client.
//!
//! The bot talks to the remote source only through the [`GameSource`] trait,
//! which lets tests substitute a scripted double for the HTTP client. A fetch
//! that fails at the HTTP or decode level is logged and surfaces as `None`
//! ("the source returned nothing"); callers translate that into a user-visible
//! message.

pub mod models;

use async_trait::async_trait;

pub use models::{CollectionEntry, GameInfo, UserInfo};

use models::{GameInfoResponse, UserInfoResponse};

/// Capability to look up collections, games and users on the remote source
#[async_trait]
pub trait GameSource: Send + Sync {
    /// Full "owned games" collection of a user, `None` when unavailable
    async fn get_collection(&self, login: &str) -> Option<Vec<CollectionEntry>>;

    /// Full detail record for one game, `None` when unavailable
    async fn get_game_detail(&self, alias: &str) -> Option<GameInfo>;

    /// User profile, `None` when unavailable
    async fn get_user_info(&self, login: &str) -> Option<UserInfo>;
}

/// HTTP client for the Tesera REST API
pub struct TeseraClient {
    http: reqwest::Client,
    base_url: String,
}

impl TeseraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Option<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Tesera request to {} failed: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::warn!("Tesera request to {} returned {}", url, response.status());
            return None;
        }

        match response.json::<T>().await {
            Ok(payload) => Some(payload),
            Err(e) => {
                log::warn!("Failed to decode Tesera response from {}: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl GameSource for TeseraClient {
    async fn get_collection(&self, login: &str) -> Option<Vec<CollectionEntry>> {
        self.get_json(&format!("collections/base/own/{}?gamesType=All", login))
            .await
    }

    async fn get_game_detail(&self, alias: &str) -> Option<GameInfo> {
        self.get_json::<GameInfoResponse>(&format!("games/{}", alias))
            .await
            .map(|response| response.game)
    }

    async fn get_user_info(&self, login: &str) -> Option<UserInfo> {
        self.get_json::<UserInfoResponse>(&format!("users/{}", login))
            .await
            .map(|response| response.user)
    }
}

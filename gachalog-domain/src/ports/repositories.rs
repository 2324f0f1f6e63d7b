use async_trait::async_trait;

use crate::entities::{HistoryRecord, ShareLink};
use crate::errors::HistoryError;
use crate::value_objects::{Game, UserId};

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Reads and validates the persisted history of `user`. Never caches.
    async fn load(&self, game: Game, user: &UserId) -> Result<HistoryRecord, HistoryError>;
    /// Replaces the persisted history of `user` with `content` as-is.
    async fn save(&self, game: Game, user: &UserId, content: &[u8]) -> Result<(), HistoryError>;
}

#[async_trait]
pub trait ShareLinkRepository: Send + Sync {
    /// Issues a fresh opaque token for `link`.
    async fn issue(&self, link: ShareLink) -> String;
    /// `None` for unknown or expired tokens.
    async fn resolve(&self, token: &str) -> Option<ShareLink>;
    async fn purge_expired(&self) -> usize;
}

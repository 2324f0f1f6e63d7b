// Share link entity
// What an opaque account token resolves to

use serde::Serialize;

use crate::value_objects::{Game, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub game: Game,
    pub user: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    pub account_id: String,
}

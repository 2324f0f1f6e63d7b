// History record entity
// One user's validated draw history for one game

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;

use crate::entities::GachaItem;
use crate::utils::{deserialize_string_or_number, deserialize_timestamp};
use crate::value_objects::Game;

#[derive(Debug, Deserialize)]
struct PersistedHistory {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    user_id: String,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    uid: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    update_time: DateTime<FixedOffset>,
    #[serde(default)]
    item_list: HashMap<String, Vec<GachaItem>>,
}

#[derive(Debug, Error)]
pub enum RecordError {
    /// The bytes are not JSON at all, or are truncated.
    #[error("malformed record: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("record does not match schema: {0}")]
    Schema(#[source] serde_json::Error),
    #[error("unknown banner type '{category}' for {game}")]
    UnknownCategory { game: Game, category: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub game: Game,
    pub user_id: String,
    pub uid: String,
    pub update_time: DateTime<FixedOffset>,
    pub item_list: HashMap<String, Vec<GachaItem>>,
}

impl HistoryRecord {
    /// Parses and validates persisted bytes. Every banner type of `game` is
    /// present in the result, possibly empty.
    pub fn from_slice(game: Game, bytes: &[u8]) -> Result<Self, RecordError> {
        let persisted: PersistedHistory =
            serde_json::from_slice(bytes).map_err(|err| match err.classify() {
                Category::Data => RecordError::Schema(err),
                Category::Syntax | Category::Eof | Category::Io => RecordError::Syntax(err),
            })?;

        let mut item_list: HashMap<String, Vec<GachaItem>> = game
            .banner_types()
            .iter()
            .map(|banner| (banner.to_string(), Vec::new()))
            .collect();
        for (category, items) in persisted.item_list {
            match item_list.get_mut(&category) {
                Some(slot) => *slot = items,
                None => return Err(RecordError::UnknownCategory { game, category }),
            }
        }

        Ok(Self {
            game,
            user_id: persisted.user_id,
            uid: persisted.uid,
            update_time: persisted.update_time,
            item_list,
        })
    }

    pub fn items(&self, banner_type: &str) -> &[GachaItem] {
        self.item_list
            .get(banner_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Item count per banner type, in the game's display order.
    pub fn category_counts(&self) -> Vec<(&'static str, usize)> {
        self.game
            .banner_types()
            .iter()
            .map(|banner| (*banner, self.items(banner).len()))
            .collect()
    }
}

// Gacha log query parameters and views

use serde::{Deserialize, Serialize};

use crate::entities::GachaItem;
use crate::utils::format_display_time;
use crate::value_objects::DisplayKeyRule;

/// Missing parameters deserialize as blank and are rejected during validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GachaLogQuery {
    pub account_id: String,
    pub banner_type: String,
    pub rarities: Option<String>,
    pub size: Option<usize>,
    pub page: Option<usize>,
    pub name_contains: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GachaItemQuery {
    pub account_id: String,
    pub banner_type: String,
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountQuery {
    pub account_id: String,
}

/// Validated form of [`GachaLogQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GachaLogFilter {
    pub banner_type: String,
    pub rarities: Vec<u8>,
    pub name_contains: Option<String>,
    pub page: usize,
    pub size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GachaLogItemView {
    pub id: String,
    pub name: String,
    pub gacha_type: String,
    pub item_type: String,
    pub rank_type: u8,
    pub time: String,
    pub display_key: String,
}

impl GachaLogItemView {
    pub fn new(item: &GachaItem, rule: DisplayKeyRule) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            gacha_type: item.gacha_type.clone(),
            item_type: item.item_type.clone(),
            rank_type: item.rank_type,
            time: format_display_time(&item.time),
            display_key: item.display_key(rule).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GachaLogPageView {
    pub game: String,
    pub banner_type: String,
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub max_page: usize,
    pub items: Vec<GachaLogItemView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BannerTypesView {
    pub game: String,
    pub banner_types: Vec<String>,
}

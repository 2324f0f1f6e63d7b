// Gacha item entity
// One draw event as persisted by the exporter

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::utils::{deserialize_rank, deserialize_string_or_number, deserialize_timestamp};
use crate::value_objects::DisplayKeyRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GachaItem {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub gacha_type: String,
    pub item_type: String,
    #[serde(deserialize_with = "deserialize_rank")]
    pub rank_type: u8,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub time: DateTime<FixedOffset>,
    #[serde(
        default,
        deserialize_with = "deserialize_string_or_number",
        skip_serializing_if = "String::is_empty"
    )]
    pub gacha_id: String,
    #[serde(
        default,
        deserialize_with = "deserialize_string_or_number",
        skip_serializing_if = "String::is_empty"
    )]
    pub item_id: String,
}

impl GachaItem {
    /// Icon lookup key. Not unique across items.
    pub fn display_key(&self, rule: DisplayKeyRule) -> &str {
        match rule {
            DisplayKeyRule::Name => &self.name,
            DisplayKeyRule::ItemIdOrName if !self.item_id.is_empty() => &self.item_id,
            DisplayKeyRule::ItemIdOrName => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> GachaItem {
        serde_json::from_value(value).expect("deserialize item")
    }

    #[test]
    fn accepts_numeric_strings_for_rank_and_ids() {
        let parsed = item(json!({
            "id": 1700000000000000001u64,
            "name": "刻晴",
            "gacha_type": "301",
            "item_type": "角色",
            "rank_type": "5",
            "time": "2023-08-29 10:21:34",
            "extra_field": true
        }));
        assert_eq!(parsed.id, "1700000000000000001");
        assert_eq!(parsed.rank_type, 5);
        assert!(parsed.item_id.is_empty());
    }

    #[test]
    fn rejects_non_numeric_rank() {
        let result = serde_json::from_value::<GachaItem>(json!({
            "id": "1",
            "name": "x",
            "gacha_type": "1",
            "item_type": "武器",
            "rank_type": "gold",
            "time": "2023-08-29 10:21:34"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn display_key_prefers_item_id_only_when_present() {
        let mut parsed = item(json!({
            "id": "1",
            "name": "艾莲",
            "gacha_type": "2",
            "item_type": "代理人",
            "rank_type": 4,
            "time": "2024-07-04T12:00:00+08:00",
            "item_id": "1191"
        }));
        assert_eq!(parsed.display_key(DisplayKeyRule::ItemIdOrName), "1191");
        assert_eq!(parsed.display_key(DisplayKeyRule::Name), "艾莲");
        parsed.item_id.clear();
        assert_eq!(parsed.display_key(DisplayKeyRule::ItemIdOrName), "艾莲");
    }
}

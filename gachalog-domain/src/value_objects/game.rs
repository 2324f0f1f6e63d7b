// Game variants

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported games. The set is closed; every variant carries its own banner
/// categories and display-key rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Genshin,
    #[serde(rename = "hsr")]
    StarRail,
    Zzz,
    Mc,
}

/// How an item's icon lookup key is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKeyRule {
    Name,
    ItemIdOrName,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game '{0}'")]
pub struct GameParseError(pub String);

impl Game {
    pub const ALL: [Game; 4] = [Game::Genshin, Game::StarRail, Game::Zzz, Game::Mc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Genshin => "genshin",
            Game::StarRail => "hsr",
            Game::Zzz => "zzz",
            Game::Mc => "mc",
        }
    }

    /// Valid banner categories in display order.
    pub fn banner_types(&self) -> &'static [&'static str] {
        match self {
            Game::Genshin => &["角色祈愿", "武器祈愿", "常驻祈愿", "新手祈愿", "集录祈愿"],
            Game::StarRail => &["角色跃迁", "光锥跃迁", "常驻跃迁", "新手跃迁"],
            Game::Zzz => &["代理人调频", "音擎调频", "常驻调频", "邦布调频"],
            Game::Mc => &["角色祈愿", "武器祈愿", "常驻祈愿", "常驻武器祈愿", "新手祈愿"],
        }
    }

    pub fn display_key_rule(&self) -> DisplayKeyRule {
        match self {
            Game::Zzz => DisplayKeyRule::ItemIdOrName,
            _ => DisplayKeyRule::Name,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Game {
    type Err = GameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "genshin" => Ok(Game::Genshin),
            "hsr" => Ok(Game::StarRail),
            "zzz" => Ok(Game::Zzz),
            "mc" => Ok(Game::Mc),
            _ => Err(GameParseError(s.to_string())),
        }
    }
}

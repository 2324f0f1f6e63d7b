use std::sync::Arc;
use std::time::Duration;

use gachalog_domain::ports::HistoryRepository;
use gachalog_domain::Game;

use crate::{HistoryCache, Metrics};

/// One history cache per game, built once at startup.
pub struct GameRegistry {
    genshin: HistoryCache,
    star_rail: HistoryCache,
    zzz: HistoryCache,
    mc: HistoryCache,
}

impl GameRegistry {
    pub fn new(repo: Arc<dyn HistoryRepository>, ttl: Duration, metrics: Arc<Metrics>) -> Self {
        let cache = |game| HistoryCache::new(game, repo.clone(), ttl, metrics.clone());
        Self {
            genshin: cache(Game::Genshin),
            star_rail: cache(Game::StarRail),
            zzz: cache(Game::Zzz),
            mc: cache(Game::Mc),
        }
    }

    pub fn cache(&self, game: Game) -> &HistoryCache {
        match game {
            Game::Genshin => &self.genshin,
            Game::StarRail => &self.star_rail,
            Game::Zzz => &self.zzz,
            Game::Mc => &self.mc,
        }
    }

    pub fn caches(&self) -> [&HistoryCache; 4] {
        [&self.genshin, &self.star_rail, &self.zzz, &self.mc]
    }
}

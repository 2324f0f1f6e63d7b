use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use gachalog_domain::ports::HistoryRepository;
use gachalog_domain::{Game, HistoryError, HistoryRecord, UserId};

use crate::Metrics;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    record: Arc<HistoryRecord>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Loaded histories of one game, keyed by user.
///
/// A single mutex guards the map and is held across the storage read, so
/// concurrent requests for a cold user share one load. The deadline is set
/// at load time and never refreshed by hits. Failed loads leave nothing
/// behind.
pub struct HistoryCache {
    game: Game,
    repo: Arc<dyn HistoryRepository>,
    ttl: Duration,
    metrics: Arc<Metrics>,
    entries: Mutex<HashMap<UserId, CacheEntry>>,
}

impl HistoryCache {
    pub fn new(
        game: Game,
        repo: Arc<dyn HistoryRepository>,
        ttl: Duration,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            game,
            repo,
            ttl,
            metrics,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub async fn get_record(&self, user: &UserId) -> Result<Arc<HistoryRecord>, HistoryError> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(user) {
            if entry.is_live(Instant::now()) {
                self.metrics.record_cache_hit();
                return Ok(entry.record.clone());
            }
            entries.remove(user);
            self.metrics.record_evictions(1);
            debug!("{} history of {} expired on access", self.game, user);
        }

        self.metrics.record_cache_miss();
        let record = match self.repo.load(self.game, user).await {
            Ok(record) => Arc::new(record),
            Err(err) => {
                self.metrics.record_load_failure();
                return Err(err);
            }
        };
        entries.insert(
            user.clone(),
            CacheEntry {
                record: record.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        debug!(
            "{} history of {} loaded: {:?}",
            self.game,
            user,
            record.category_counts()
        );
        Ok(record)
    }

    pub async fn contains(&self, user: &UserId) -> bool {
        let entries = self.entries.lock().await;
        entries
            .get(user)
            .map(|entry| entry.is_live(Instant::now()))
            .unwrap_or(false)
    }

    /// Drops the cached history of `user`, if any.
    pub async fn evict(&self, user: &UserId) -> bool {
        let removed = self.entries.lock().await.remove(user).is_some();
        if removed {
            self.metrics.record_evictions(1);
        }
        removed
    }

    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let purged = before - entries.len();
        if purged > 0 {
            self.metrics.record_evictions(purged);
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

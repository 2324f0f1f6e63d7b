use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::GameRegistry;

/// Periodically drops expired histories from every game's cache.
pub async fn run_cache_sweeper(registry: Arc<GameRegistry>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        for cache in registry.caches() {
            let purged = cache.purge_expired().await;
            if purged > 0 {
                debug!("purged {} expired {} histories", purged, cache.game());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_history, StubHistoryRepository};
    use crate::Metrics;
    use gachalog_domain::{Game, UserId};

    #[tokio::test(start_paused = true)]
    async fn sweeper_empties_caches_after_ttl() {
        let repo = Arc::new(
            StubHistoryRepository::default().with_record(Game::Zzz, "9", sample_history(2)),
        );
        let registry = Arc::new(GameRegistry::new(
            repo,
            Duration::from_secs(3600),
            Arc::new(Metrics::default()),
        ));
        let user = UserId::parse("9").expect("user");
        registry.cache(Game::Zzz).get_record(&user).await.expect("load");

        let sweeper = tokio::spawn(run_cache_sweeper(registry.clone(), Duration::from_secs(60)));
        tokio::time::sleep(Duration::from_secs(3660)).await;

        assert_eq!(registry.cache(Game::Zzz).len().await, 0);
        sweeper.abort();
    }
}

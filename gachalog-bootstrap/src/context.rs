use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use gachalog_application::{AppState, GameRegistry, Metrics};
use gachalog_domain::{HistoryRepository, ShareLinkRepository};
use gachalog_infrastructure::{AppConfig, HistoryFileRepository, InMemoryShareLinkRepository};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        tokio::fs::create_dir_all(&runtime_config.data_dir)
            .await
            .with_context(|| format!("failed to create data_dir {}", runtime_config.data_dir))?;
        info!("serving histories from {}", runtime_config.data_dir);

        let history_repo: Arc<dyn HistoryRepository> =
            Arc::new(HistoryFileRepository::new(&runtime_config.data_dir));
        let share_links: Arc<dyn ShareLinkRepository> = Arc::new(InMemoryShareLinkRepository::new(
            Duration::from_secs(runtime_config.share_link_ttl_seconds),
        ));
        let metrics = Arc::new(Metrics::default());
        let registry = Arc::new(GameRegistry::new(
            history_repo.clone(),
            Duration::from_secs(runtime_config.cache_ttl_seconds),
            metrics.clone(),
        ));

        let state = AppState {
            config: runtime_config,
            history_repo,
            share_links,
            registry,
            metrics,
        };

        Ok(Self { state })
    }
}

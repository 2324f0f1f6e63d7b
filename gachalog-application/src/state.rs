use std::sync::Arc;

use gachalog_domain::ports::{HistoryRepository, ShareLinkRepository};
use gachalog_domain::RuntimeConfig;

use crate::{GameRegistry, Metrics};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub history_repo: Arc<dyn HistoryRepository>,
    pub share_links: Arc<dyn ShareLinkRepository>,
    pub registry: Arc<GameRegistry>,
    pub metrics: Arc<Metrics>,
}

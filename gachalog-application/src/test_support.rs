use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone};

use gachalog_domain::ports::{HistoryRepository, ShareLinkRepository};
use gachalog_domain::{
    reference_offset, GachaItem, Game, HistoryError, HistoryRecord, RuntimeConfig, ShareLink,
    UserId,
};

use crate::{AppState, GameRegistry, Metrics};

pub const SAMPLE_BANNER: &str = "角色祈愿";

/// In-memory history store that counts loads.
#[derive(Default)]
pub struct StubHistoryRepository {
    records: HashMap<(Game, String), HistoryRecord>,
    invalid: HashSet<(Game, String)>,
    saved: Mutex<Vec<(Game, String, Vec<u8>)>>,
    delay: Option<Duration>,
    loads: AtomicUsize,
}

impl StubHistoryRepository {
    pub fn with_record(mut self, game: Game, user: &str, mut record: HistoryRecord) -> Self {
        record.game = game;
        self.records.insert((game, user.to_string()), record);
        self
    }

    pub fn with_invalid(mut self, game: Game, user: &str) -> Self {
        self.invalid.insert((game, user.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> Vec<(Game, String, Vec<u8>)> {
        self.saved.lock().expect("saved lock").clone()
    }
}

#[async_trait]
impl HistoryRepository for StubHistoryRepository {
    async fn load(&self, game: Game, user: &UserId) -> Result<HistoryRecord, HistoryError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let key = (game, user.as_str().to_string());
        if self.invalid.contains(&key) {
            return Err(HistoryError::InvalidRecord("unknown banner type".to_string()));
        }
        self.records.get(&key).cloned().ok_or(HistoryError::NotFound)
    }

    async fn save(&self, game: Game, user: &UserId, content: &[u8]) -> Result<(), HistoryError> {
        self.saved
            .lock()
            .expect("saved lock")
            .push((game, user.as_str().to_string(), content.to_vec()));
        Ok(())
    }
}

/// A genshin history with `count` draws in the character banner, oldest first.
/// Draw `n` is named `item-n` with rarity 3, 4 or 5 in rotation.
pub fn sample_history(count: usize) -> HistoryRecord {
    let base = reference_offset()
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("base time");
    let items = (0..count)
        .map(|idx| GachaItem {
            id: format!("{idx}"),
            name: format!("item-{idx}"),
            gacha_type: "301".to_string(),
            item_type: "角色".to_string(),
            rank_type: 3 + (idx % 3) as u8,
            time: base + ChronoDuration::minutes(idx as i64),
            gacha_id: String::new(),
            item_id: String::new(),
        })
        .collect();
    let mut item_list: HashMap<String, Vec<GachaItem>> = Game::Genshin
        .banner_types()
        .iter()
        .map(|banner| (banner.to_string(), Vec::new()))
        .collect();
    item_list.insert(SAMPLE_BANNER.to_string(), items);
    HistoryRecord {
        game: Game::Genshin,
        user_id: "owner".to_string(),
        uid: "100000001".to_string(),
        update_time: base,
        item_list,
    }
}

/// Share links that never expire, with sequential tokens.
#[derive(Default)]
pub struct StubShareLinks {
    links: Mutex<HashMap<String, ShareLink>>,
}

#[async_trait]
impl ShareLinkRepository for StubShareLinks {
    async fn issue(&self, link: ShareLink) -> String {
        let mut links = self.links.lock().expect("links lock");
        let token = format!("token-{}", links.len());
        links.insert(token.clone(), link);
        token
    }

    async fn resolve(&self, token: &str) -> Option<ShareLink> {
        self.links.lock().expect("links lock").get(token).cloned()
    }

    async fn purge_expired(&self) -> usize {
        0
    }
}

/// State with upload token `secret` and a one-hour history TTL.
pub fn state_with(repo: StubHistoryRepository) -> AppState {
    state_with_shared(Arc::new(repo))
}

pub fn state_with_shared(repo: Arc<StubHistoryRepository>) -> AppState {
    let repo: Arc<dyn HistoryRepository> = repo;
    let metrics = Arc::new(Metrics::default());
    AppState {
        config: RuntimeConfig {
            upload_token: Some("secret".to_string()),
            ..RuntimeConfig::default()
        },
        history_repo: repo.clone(),
        share_links: Arc::new(StubShareLinks::default()),
        registry: Arc::new(GameRegistry::new(repo, Duration::from_secs(3600), metrics.clone())),
        metrics,
    }
}

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use gachalog_domain::{ShareLink, ShareLinkRepository};

struct StoredLink {
    link: ShareLink,
    expires_at: Instant,
}

/// Random 128-bit tokens (32 lowercase hex chars) mapped to `(game, uid)`, each
/// with a flat TTL set at issue time.
pub struct InMemoryShareLinkRepository {
    ttl: Duration,
    links: RwLock<HashMap<String, StoredLink>>,
}

impl InMemoryShareLinkRepository {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            links: RwLock::new(HashMap::new()),
        }
    }
}

fn random_token() -> String {
    let bytes: [u8; 16] = rand::random();
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[async_trait]
impl ShareLinkRepository for InMemoryShareLinkRepository {
    async fn issue(&self, link: ShareLink) -> String {
        let token = random_token();
        let stored = StoredLink {
            link,
            expires_at: Instant::now() + self.ttl,
        };
        self.links.write().await.insert(token.clone(), stored);
        token
    }

    async fn resolve(&self, token: &str) -> Option<ShareLink> {
        {
            let links = self.links.read().await;
            let stored = links.get(token)?;
            if Instant::now() < stored.expires_at {
                return Some(stored.link.clone());
            }
        }
        let mut links = self.links.write().await;
        if links
            .get(token)
            .map(|stored| Instant::now() >= stored.expires_at)
            .unwrap_or(false)
        {
            links.remove(token);
        }
        None
    }

    async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut links = self.links.write().await;
        let before = links.len();
        links.retain(|_, stored| now < stored.expires_at);
        before - links.len()
    }
}

pub async fn run_share_link_purge(repo: Arc<dyn ShareLinkRepository>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let purged = repo.purge_expired().await;
        if purged > 0 {
            debug!("purged {} expired share links", purged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gachalog_domain::{Game, UserId};

    fn link(uid: &str) -> ShareLink {
        ShareLink {
            game: Game::Genshin,
            user: UserId::parse(uid).expect("user"),
        }
    }

    #[tokio::test]
    async fn tokens_are_opaque_hex() {
        let repo = InMemoryShareLinkRepository::new(Duration::from_secs(60));
        let first = repo.issue(link("1")).await;
        let second = repo.issue(link("1")).await;
        assert_eq!(first.len(), 32);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_ne!(first, second);
        assert_eq!(repo.resolve(&first).await, Some(link("1")));
    }

    #[test]
    fn tokens_use_the_full_byte_range() {
        // uuid v4 pins the version nibble at index 12; raw random bytes do not.
        let nibbles: std::collections::HashSet<char> = (0..64)
            .map(|_| random_token())
            .filter_map(|token| token.chars().nth(12))
            .collect();
        assert!(nibbles.len() > 1);
    }

    #[tokio::test(start_paused = true)]
    async fn links_expire_after_ttl() {
        let repo = InMemoryShareLinkRepository::new(Duration::from_secs(600));
        let token = repo.issue(link("2")).await;

        tokio::time::advance(Duration::from_secs(599)).await;
        assert!(repo.resolve(&token).await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(repo.resolve(&token).await.is_none());
        assert_eq!(repo.purge_expired().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn purge_drops_only_expired_links() {
        let repo = InMemoryShareLinkRepository::new(Duration::from_secs(100));
        repo.issue(link("3")).await;
        tokio::time::advance(Duration::from_secs(60)).await;
        let fresh = repo.issue(link("4")).await;
        tokio::time::advance(Duration::from_secs(60)).await;

        assert_eq!(repo.purge_expired().await, 1);
        assert_eq!(repo.resolve(&fresh).await, Some(link("4")));
        assert!(repo.resolve("unknown").await.is_none());
    }
}

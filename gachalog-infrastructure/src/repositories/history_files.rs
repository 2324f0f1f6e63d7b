use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use gachalog_domain::{Game, HistoryError, HistoryRecord, HistoryRepository, RecordError, UserId};

/// Histories stored as `<root>/<game>/<uid>.json`.
pub struct HistoryFileRepository {
    root: PathBuf,
}

impl HistoryFileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn history_path(&self, game: Game, user: &UserId) -> PathBuf {
        self.root.join(game.as_str()).join(format!("{}.json", user))
    }
}

#[async_trait]
impl HistoryRepository for HistoryFileRepository {
    async fn load(&self, game: Game, user: &UserId) -> Result<HistoryRecord, HistoryError> {
        let path = self.history_path(game, user);
        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(HistoryError::NotFound),
            Err(err) => return Err(HistoryError::Storage(err)),
        };
        HistoryRecord::from_slice(game, &content).map_err(|err| match err {
            // Shown to the user like a missing file.
            RecordError::Syntax(err) => {
                warn!("corrupt history file {}: {}", path.display(), err);
                HistoryError::NotFound
            }
            other => HistoryError::InvalidRecord(other.to_string()),
        })
    }

    async fn save(&self, game: Game, user: &UserId, content: &[u8]) -> Result<(), HistoryError> {
        let path = self.history_path(game, user);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let tmp_path = path.with_file_name(format!("{}.{}.tmp", user, Uuid::new_v4().simple()));
        fs::write(&tmp_path, content).await?;
        if let Err(err) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(HistoryError::Storage(err));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(raw: &str) -> UserId {
        UserId::parse(raw).expect("user")
    }

    fn zzz_history() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "user_id": "1",
            "uid": "10001",
            "update_time": "2024-07-10 20:00:00",
            "item_list": {
                "代理人调频": [
                    {
                        "id": "a1",
                        "name": "艾莲",
                        "gacha_type": "2",
                        "item_type": "代理人",
                        "rank_type": "4",
                        "time": "2024-07-04 12:00:00",
                        "item_id": "1191",
                        "gacha_id": "2001"
                    },
                    {
                        "id": "a2",
                        "name": "安比",
                        "gacha_type": "2",
                        "item_type": "代理人",
                        "rank_type": "3",
                        "time": "2024-07-04 12:00:01"
                    }
                ],
                "邦布调频": []
            }
        }))
        .expect("encode")
    }

    #[tokio::test]
    async fn saved_history_loads_back_with_all_banners() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = HistoryFileRepository::new(dir.path());
        let uid = user("10001");

        repo.save(Game::Zzz, &uid, &zzz_history()).await.expect("save");
        assert!(dir.path().join("zzz").join("10001.json").exists());

        let record = repo.load(Game::Zzz, &uid).await.expect("load");
        let counts = record.category_counts();
        assert_eq!(
            counts,
            vec![("代理人调频", 2), ("音擎调频", 0), ("常驻调频", 0), ("邦布调频", 0)]
        );
        assert_eq!(record.items("代理人调频")[0].item_id, "1191");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = HistoryFileRepository::new(dir.path());
        let result = repo.load(Game::Genshin, &user("1")).await;
        assert!(matches!(result, Err(HistoryError::NotFound)));
    }

    #[tokio::test]
    async fn corrupt_file_folds_into_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = HistoryFileRepository::new(dir.path());
        let uid = user("2");
        repo.save(Game::Genshin, &uid, b"{\"user_id\": ").await.expect("save");

        let result = repo.load(Game::Genshin, &uid).await;
        assert!(matches!(result, Err(HistoryError::NotFound)));
    }

    #[tokio::test]
    async fn schema_mismatch_is_invalid_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = HistoryFileRepository::new(dir.path());
        let uid = user("3");
        repo.save(Game::Genshin, &uid, &zzz_history()).await.expect("save");

        let result = repo.load(Game::Genshin, &uid).await;
        assert!(matches!(
            result,
            Err(HistoryError::InvalidRecord(reason)) if reason.contains("代理人调频")
        ));
    }

    #[tokio::test]
    async fn save_replaces_previous_upload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = HistoryFileRepository::new(dir.path());
        let uid = user("4");
        repo.save(Game::Mc, &uid, b"old").await.expect("first save");
        repo.save(Game::Mc, &uid, b"new").await.expect("second save");

        let content = std::fs::read(repo.history_path(Game::Mc, &uid)).expect("read");
        assert_eq!(content, b"new");
        let leftovers = std::fs::read_dir(dir.path().join("mc")).expect("dir").count();
        assert_eq!(leftovers, 1);
    }
}

use anyhow::anyhow;
use tracing::{error, info, warn};

use gachalog_domain::{Game, ShareLink, UploadReceipt, UserId};

use crate::{AppError, AppState};

#[derive(Debug)]
pub struct UploadRequest {
    pub token: String,
    pub uid: String,
    pub game: String,
    pub content: Vec<u8>,
}

/// Stores an uploaded history as-is and issues a share link for it. The
/// record is only validated when it is first queried.
pub async fn upload_history(
    state: &AppState,
    request: UploadRequest,
) -> Result<UploadReceipt, AppError> {
    if !is_upload_authorized(state.config.upload_token.as_deref(), &request.token) {
        state.metrics.record_upload_rejected();
        warn!("rejected upload with invalid token");
        return Err(AppError::Unauthorized);
    }
    let game: Game = request
        .game
        .parse()
        .map_err(|err: gachalog_domain::GameParseError| AppError::BadRequest(err.to_string()))?;
    let user = UserId::parse(&request.uid)
        .map_err(|err| AppError::BadRequest(format!("invalid uid: {}", err)))?;
    if request.content.is_empty() {
        return Err(AppError::BadRequest("file must not be empty".to_string()));
    }

    state
        .history_repo
        .save(game, &user, &request.content)
        .await
        .map_err(|err| {
            error!("failed to store {} history of {}: {}", game, user, err);
            AppError::Internal(anyhow!(err))
        })?;
    state.registry.cache(game).evict(&user).await;

    let account_id = state
        .share_links
        .issue(ShareLink {
            game,
            user: user.clone(),
        })
        .await;
    state.metrics.record_upload();
    info!(
        "stored {} history of {} ({} bytes)",
        game,
        user,
        request.content.len()
    );
    Ok(UploadReceipt { account_id })
}

fn is_upload_authorized(expected: Option<&str>, provided: &str) -> bool {
    match expected {
        Some(expected) => !provided.is_empty() && expected == provided,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::test_support::{sample_history, state_with, state_with_shared, StubHistoryRepository};

    fn request(token: &str, uid: &str, game: &str) -> UploadRequest {
        UploadRequest {
            token: token.to_string(),
            uid: uid.to_string(),
            game: game.to_string(),
            content: b"{}".to_vec(),
        }
    }

    #[test]
    fn uploads_require_configured_token() {
        assert!(is_upload_authorized(Some("secret"), "secret"));
        assert!(!is_upload_authorized(Some("secret"), "other"));
        assert!(!is_upload_authorized(None, ""));
        assert!(!is_upload_authorized(None, "secret"));
    }

    #[tokio::test]
    async fn upload_saves_and_issues_resolvable_link() {
        let repo = Arc::new(StubHistoryRepository::default());
        let state = state_with_shared(repo.clone());
        let receipt = upload_history(&state, request("secret", "100000001", "hsr"))
            .await
            .expect("upload");

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], (Game::StarRail, "100000001".to_string(), b"{}".to_vec()));

        let link = state.share_links.resolve(&receipt.account_id).await.expect("link");
        assert_eq!(link.game, Game::StarRail);
        assert_eq!(link.user.as_str(), "100000001");
    }

    #[tokio::test]
    async fn upload_rejects_bad_token_game_and_uid() {
        let state = state_with(StubHistoryRepository::default());
        assert!(matches!(
            upload_history(&state, request("wrong", "1", "zzz")).await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            upload_history(&state, request("secret", "1", "wuwa")).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            upload_history(&state, request("secret", "../1", "zzz")).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn upload_evicts_cached_history() {
        let repo =
            StubHistoryRepository::default().with_record(Game::Genshin, "7", sample_history(1));
        let state = state_with(repo);
        let user = UserId::parse("7").expect("user");
        state.registry.cache(Game::Genshin).get_record(&user).await.expect("load");

        upload_history(&state, request("secret", "7", "genshin")).await.expect("upload");
        assert!(!state.registry.cache(Game::Genshin).contains(&user).await);
    }
}

use std::sync::Arc;

use anyhow::anyhow;
use tracing::{error, warn};

use gachalog_domain::{
    find_item, max_page, query, AccountQuery, BannerTypesView, GachaItemQuery, GachaLogFilter,
    GachaLogItemView, GachaLogPageView, GachaLogQuery, HistoryError, HistoryRecord, ShareLink,
};

use crate::{AppError, AppState};

pub const EXPIRED_MESSAGE: &str = "link expired, please upload again";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const MAX_PAGE_SIZE: usize = 500;

pub async fn list_gacha_logs(
    state: &AppState,
    query_params: GachaLogQuery,
) -> Result<GachaLogPageView, AppError> {
    let filter = parse_filter(&query_params)?;
    let link = resolve_account(state, &query_params.account_id).await?;
    let record = load_history(state, &link).await?;
    state.metrics.record_query();

    let rule = link.game.display_key_rule();
    let page = query(&record, &filter);
    Ok(GachaLogPageView {
        game: link.game.to_string(),
        banner_type: filter.banner_type.clone(),
        page: filter.page,
        size: filter.size,
        total: page.total,
        max_page: max_page(page.total, filter.size),
        items: page
            .items
            .into_iter()
            .map(|item| GachaLogItemView::new(item, rule))
            .collect(),
    })
}

pub async fn get_gacha_item(
    state: &AppState,
    query_params: GachaItemQuery,
) -> Result<GachaLogItemView, AppError> {
    let banner_type = required_text(&query_params.banner_type, "banner_type")?;
    let id = required_text(&query_params.id, "id")?;
    let link = resolve_account(state, &query_params.account_id).await?;
    let record = load_history(state, &link).await?;

    find_item(&record, &banner_type, &id)
        .map(|item| GachaLogItemView::new(item, link.game.display_key_rule()))
        .ok_or_else(|| AppError::NotFound(format!("item '{}' not found", id)))
}

pub async fn list_banner_types(
    state: &AppState,
    query_params: AccountQuery,
) -> Result<BannerTypesView, AppError> {
    let link = resolve_account(state, &query_params.account_id).await?;
    Ok(BannerTypesView {
        game: link.game.to_string(),
        banner_types: link
            .game
            .banner_types()
            .iter()
            .map(|banner| banner.to_string())
            .collect(),
    })
}

async fn resolve_account(state: &AppState, account_id: &str) -> Result<ShareLink, AppError> {
    let token = required_text(account_id, "account_id")?;
    state
        .share_links
        .resolve(&token)
        .await
        .ok_or_else(|| AppError::NotFound(EXPIRED_MESSAGE.to_string()))
}

async fn load_history(state: &AppState, link: &ShareLink) -> Result<Arc<HistoryRecord>, AppError> {
    state
        .registry
        .cache(link.game)
        .get_record(&link.user)
        .await
        .map_err(|err| match err {
            HistoryError::NotFound => AppError::NotFound(EXPIRED_MESSAGE.to_string()),
            HistoryError::InvalidRecord(reason) => {
                warn!("rejected {} history of {}: {}", link.game, link.user, reason);
                AppError::NotFound(EXPIRED_MESSAGE.to_string())
            }
            HistoryError::Storage(err) => {
                error!("failed to read {} history of {}: {}", link.game, link.user, err);
                AppError::Internal(anyhow!(err))
            }
        })
}

fn parse_filter(query_params: &GachaLogQuery) -> Result<GachaLogFilter, AppError> {
    let banner_type = required_text(&query_params.banner_type, "banner_type")?;
    let size = query_params.size.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&size) {
        return Err(AppError::BadRequest(format!(
            "size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    let page = query_params.page.unwrap_or(1);
    if page == 0 {
        return Err(AppError::BadRequest("page must be >= 1".to_string()));
    }
    let rarities = parse_rarities(query_params.rarities.as_deref().unwrap_or(""))?;
    let name_contains = query_params
        .name_contains
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    Ok(GachaLogFilter {
        banner_type,
        rarities,
        name_contains,
        page,
        size,
    })
}

fn parse_rarities(raw: &str) -> Result<Vec<u8>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<u8>()
                .map_err(|_| AppError::BadRequest(format!("invalid rarity '{}'", value)))
        })
        .collect()
}

fn required_text(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

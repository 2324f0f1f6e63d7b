use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use gachalog_application::queries::gacha_log_queries;
use gachalog_application::AppState;
use gachalog_domain::{
    AccountQuery, BannerTypesView, GachaItemQuery, GachaLogItemView, GachaLogPageView,
    GachaLogQuery,
};

use crate::error::HttpError;

/// Malformed query strings (`page=abc`, `size=-1`) are parameter errors, not
/// axum's plain-text 400.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, HttpError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))
}

pub async fn list_gacha_logs(
    State(state): State<AppState>,
    query: Result<Query<GachaLogQuery>, QueryRejection>,
) -> Result<Json<GachaLogPageView>, HttpError> {
    let page = gacha_log_queries::list_gacha_logs(&state, query_params(query)?).await?;
    Ok(Json(page))
}

pub async fn get_gacha_item(
    State(state): State<AppState>,
    query: Result<Query<GachaItemQuery>, QueryRejection>,
) -> Result<Json<GachaLogItemView>, HttpError> {
    let item = gacha_log_queries::get_gacha_item(&state, query_params(query)?).await?;
    Ok(Json(item))
}

pub async fn list_banner_types(
    State(state): State<AppState>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<Json<BannerTypesView>, HttpError> {
    let view = gacha_log_queries::list_banner_types(&state, query_params(query)?).await?;
    Ok(Json(view))
}

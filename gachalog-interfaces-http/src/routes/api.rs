use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use gachalog_application::AppState;

use crate::handlers::{gacha_log_handlers, ops_handlers, upload_handlers};

pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX);
    Router::new()
        .route("/upload", post(upload_handlers::upload_history))
        .route("/gacha_log", get(gacha_log_handlers::list_gacha_logs))
        .route("/gacha_log/item", get(gacha_log_handlers::get_gacha_item))
        .route(
            "/gacha_log/banner_types",
            get(gacha_log_handlers::list_banner_types),
        )
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route(
            "/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

use std::sync::Arc;

use atlas_core::countries::RefreshStatus;
use axum::{extract::State, routing::get, Json, Router};

use crate::{error::ApiResult, main_lib::AppState};

/// Store-wide counters. `last_refreshed_at` is `null` until the first refresh.
async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshStatus>> {
    let status = state.country_service.get_status()?;
    Ok(Json(status))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(get_status))
        .route("/healthz", get(healthz))
}

use std::sync::Arc;

use atlas_core::countries::{Country, CountryQuery, CountrySort, RefreshOutcome};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Serialize)]
struct RefreshResponse {
    message: &'static str,
    #[serde(flatten)]
    outcome: RefreshOutcome,
}

/// Runs a full refresh. The work happens on its own task so a client that
/// hangs up mid-refresh does not cancel writes already under way.
async fn refresh_countries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RefreshResponse>> {
    let service = state.refresh_service.clone();
    let outcome = tokio::spawn(async move { service.refresh().await })
        .await
        .map_err(|e| ApiError::Internal(format!("Refresh task failed: {}", e)))??;

    Ok(Json(RefreshResponse {
        message: "Countries refreshed successfully",
        outcome,
    }))
}

#[derive(Deserialize, Default)]
struct ListParams {
    region: Option<String>,
    currency: Option<String>,
    sort: Option<String>,
}

impl From<ListParams> for CountryQuery {
    fn from(params: ListParams) -> Self {
        // An empty value means "no filter", same as leaving it out.
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        CountryQuery {
            region: non_empty(params.region),
            currency: non_empty(params.currency),
            sort: params
                .sort
                .as_deref()
                .map(CountrySort::parse)
                .unwrap_or_default(),
        }
    }
}

async fn list_countries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Country>>> {
    let countries = state.country_service.list_countries(&params.into())?;
    Ok(Json(countries))
}

async fn get_country(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Country>> {
    let country = state.country_service.get_country(&name)?;
    Ok(Json(country))
}

async fn delete_country(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    state.country_service.delete_country(&name).await?;
    Ok(Json(json!({ "message": "Country deleted successfully" })))
}

async fn get_summary_image(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let bytes = state.summary_service.get_image()?;
    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        bytes,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/countries/refresh", post(refresh_countries))
        .route("/countries", get(list_countries))
        .route("/countries/image", get(get_summary_image))
        .route("/countries/{name}", get(get_country).delete(delete_country))
}

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{DetailsView, MovieId},
    services::SearchCount,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct TrailerResponse {
    pub key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<usize>,
}

/// Details modal. Opening a title from the catalog counts as a search hit.
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<DetailsView>> {
    let view = state.controller.lock().await.open_details(id).await?;
    Ok(Json(view))
}

pub async fn trailer(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<TrailerResponse>> {
    let key = state.controller.lock().await.trailer(id).await?;
    Ok(Json(TrailerResponse { key }))
}

pub async fn trending_searches(
    State(state): State<AppState>,
    Query(params): Query<TrendingQuery>,
) -> Json<Vec<SearchCount>> {
    Json(
        state
            .controller
            .lock()
            .await
            .trending_searches(params.limit)
            .await,
    )
}

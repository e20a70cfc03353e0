use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    controller::{CatalogPage, HomeView, SuggestionState, ViewPage},
    error::AppResult,
    models::{CatalogRow, DiscoverFilters, Genre, RowKey, Suggestion, View},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct KidsModeRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub view: View,
}

pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    Json(state.controller.lock().await.home())
}

/// Loads rows, genres and the first catalog page, then returns the home view
pub async fn load_initial(State(state): State<AppState>) -> AppResult<Json<HomeView>> {
    let mut controller = state.controller.lock().await;
    controller.load_initial().await?;
    Ok(Json(controller.home()))
}

pub async fn set_view(
    State(state): State<AppState>,
    Json(request): Json<ViewRequest>,
) -> Json<ViewPage> {
    let mut controller = state.controller.lock().await;
    controller.set_view(request.view);
    Json(controller.view_page(request.view))
}

pub async fn view_page(State(state): State<AppState>, Path(view): Path<View>) -> Json<ViewPage> {
    Json(state.controller.lock().await.view_page(view))
}

pub async fn rows(State(state): State<AppState>) -> Json<Vec<CatalogRow>> {
    Json(state.controller.lock().await.rows().to_vec())
}

pub async fn load_more_row(
    State(state): State<AppState>,
    Path(key): Path<RowKey>,
) -> AppResult<Json<CatalogRow>> {
    let row = state.controller.lock().await.load_more_row(key).await?;
    Ok(Json(row))
}

pub async fn genres(State(state): State<AppState>) -> Json<Vec<Genre>> {
    Json(state.controller.lock().await.genres().to_vec())
}

pub async fn catalog(State(state): State<AppState>) -> Json<CatalogPage> {
    Json(state.controller.lock().await.catalog_page())
}

pub async fn load_more_catalog(State(state): State<AppState>) -> AppResult<Json<CatalogPage>> {
    let mut controller = state.controller.lock().await;
    controller.load_more_catalog().await?;
    Ok(Json(controller.catalog_page()))
}

pub async fn refresh_catalog(State(state): State<AppState>) -> AppResult<Json<CatalogPage>> {
    let mut controller = state.controller.lock().await;
    controller.refresh_catalog().await?;
    Ok(Json(controller.catalog_page()))
}

pub async fn set_filters(
    State(state): State<AppState>,
    Json(filters): Json<DiscoverFilters>,
) -> Json<CatalogPage> {
    let mut controller = state.controller.lock().await;
    controller.set_filters(filters).await;
    Json(controller.catalog_page())
}

pub async fn set_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Json<CatalogPage> {
    let mut controller = state.controller.lock().await;
    controller.set_query(&request.query).await;
    Json(controller.catalog_page())
}

pub async fn set_kids_mode(
    State(state): State<AppState>,
    Json(request): Json<KidsModeRequest>,
) -> Json<CatalogPage> {
    let mut controller = state.controller.lock().await;
    controller.set_kids_mode(request.enabled).await;
    Json(controller.catalog_page())
}

pub async fn suggestions(State(state): State<AppState>) -> Json<SuggestionState> {
    Json(state.controller.lock().await.suggestions())
}

pub async fn close_suggestions(State(state): State<AppState>) -> StatusCode {
    state.controller.lock().await.close_suggestions();
    StatusCode::NO_CONTENT
}

pub async fn pick_suggestion(
    State(state): State<AppState>,
    Json(suggestion): Json<Suggestion>,
) -> Json<CatalogPage> {
    let mut controller = state.controller.lock().await;
    controller.pick_suggestion(&suggestion).await;
    Json(controller.catalog_page())
}

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{LibraryEntry, Movie, MovieId},
    state::AppState,
};

/// Result of a watchlist or like toggle
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// Whether the title is in the list after the toggle
    pub active: bool,
    pub items: Vec<LibraryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AddHistoryRequest {
    pub movie: Movie,
    #[serde(default)]
    pub progress: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress: f64,
}

pub async fn watchlist(State(state): State<AppState>) -> Json<Vec<LibraryEntry>> {
    Json(state.controller.lock().await.watchlist().to_vec())
}

pub async fn toggle_watchlist(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<Json<ToggleResponse>> {
    let mut controller = state.controller.lock().await;
    let active = controller.toggle_watchlist(&movie).await?;
    Ok(Json(ToggleResponse {
        active,
        items: controller.watchlist().to_vec(),
    }))
}

pub async fn likes(State(state): State<AppState>) -> Json<Vec<LibraryEntry>> {
    Json(state.controller.lock().await.likes().to_vec())
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<Json<ToggleResponse>> {
    let mut controller = state.controller.lock().await;
    let active = controller.toggle_like(&movie).await?;
    Ok(Json(ToggleResponse {
        active,
        items: controller.likes().to_vec(),
    }))
}

pub async fn history(State(state): State<AppState>) -> Json<Vec<LibraryEntry>> {
    Json(state.controller.lock().await.history().to_vec())
}

pub async fn add_history(
    State(state): State<AppState>,
    Json(request): Json<AddHistoryRequest>,
) -> AppResult<Json<LibraryEntry>> {
    let mut controller = state.controller.lock().await;
    let entry = controller
        .add_history(&request.movie, request.progress)
        .await?;
    Ok(Json(entry))
}

pub async fn set_progress(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
    Json(request): Json<ProgressRequest>,
) -> AppResult<Json<LibraryEntry>> {
    let entry = state
        .controller
        .lock()
        .await
        .set_progress(id, request.progress)?;
    Ok(Json(entry))
}

pub async fn continue_watching(State(state): State<AppState>) -> Json<Vec<LibraryEntry>> {
    Json(state.controller.lock().await.continue_watching())
}

pub async fn recommendations(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.controller.lock().await.recommended())
}

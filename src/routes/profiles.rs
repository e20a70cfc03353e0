use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Profile,
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub is_kids: bool,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Profile>>> {
    let controller = state.controller.lock().await;
    if controller.state().user().is_none() {
        return Err(AppError::NotAuthenticated);
    }
    Ok(Json(controller.profiles().to_vec()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    let mut controller = state.controller.lock().await;
    let profile = controller
        .create_profile(&request.name, request.is_kids)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Profile>> {
    let profile = state.controller.lock().await.select_profile(&id).await?;
    Ok(Json(profile))
}

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    controller::Snapshot,
    error::AppResult,
    models::Session,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Session>)> {
    let mut controller = state.controller.lock().await;
    let session = controller
        .register(&request.name, &request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<Session>> {
    let mut controller = state.controller.lock().await;
    let session = controller.login(&request.email, &request.password).await?;
    Ok(Json(session))
}

pub async fn logout(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.controller.lock().await.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Session state plus the current browse settings
pub async fn session(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.controller.lock().await.snapshot())
}
